#[cfg(test)]
mod tests {
    use epi_census::{census, isolation, reconcile, report, ConsolidationPolicy, ReconcilerConfig};

    fn census_html() -> &'static str {
        "<html><body><table>\
         <tr><td>ESPECIALIDAD: MEDICINA INTERNA</td><td></td><td></td><td></td>\
         <td></td><td></td><td></td><td></td><td></td><td></td></tr>\
         <tr><td>1201</td><td>123456</td><td>ANA PÉREZ</td><td>F</td><td>45</td>\
         <td></td><td>A41.9</td><td></td><td></td><td>01/02/2026</td></tr>\
         <tr><td>7302</td><td>654321</td><td>EVA RUIZ</td><td>F</td><td>60</td>\
         <td></td><td>J96.0</td><td></td><td></td><td>02/02/2026</td></tr>\
         </table></body></html>"
    }

    fn isolation_csv() -> &'static str {
        "CONTROL DE AISLAMIENTOS,,,,,\n\
         NO.,CAMA,REGISTRO,NOMBRE,TIPO DE AISLAMIENTO,FECHA DE TÉRMINO\n\
         1,1201,123456,Ana Pérez,Contact,\n\
         2,,,,Droplet,\n\
         3,9090,555111,Mario Soto,Contact,\n"
    }

    #[test]
    fn full_run_partitions_and_routes() {
        let config = ReconcilerConfig::default();

        let patients = census::extract(census_html()).unwrap();
        assert_eq!(patients.len(), 2);
        // Bed prefix 73 places Eva Ruiz in UCIA despite the section label
        assert_eq!(patients[1].unit, "UCIA");

        let rows = isolation::source::parse_csv_rows(isolation_csv()).unwrap();
        let isolations = isolation::normalize(&rows, ConsolidationPolicy::FirstNonBlank).unwrap();
        assert_eq!(isolations.len(), 2);

        let outcome = reconcile::reconcile(&patients, &isolations, &config);
        // Two census patients plus one isolation-only patient
        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.complete.len(), 2);
        assert_eq!(outcome.review.len(), 1);
        assert_eq!(outcome.review[0].registration, "555111");

        // Matched patient carries the consolidated precautions
        let ana = outcome
            .complete
            .iter()
            .find(|r| r.registration == "123456")
            .unwrap();
        assert_eq!(ana.precautions.as_slice(), ["Contact", "Droplet"]);

        // UCIA patient without an isolation entry gets the baseline profile
        let eva = outcome
            .complete
            .iter()
            .find(|r| r.registration == "654321")
            .unwrap();
        assert_eq!(eva.precautions.as_slice(), [config.baseline_precaution.clone()]);

        // Report routing: UCIA leads MEDICINA INTERNA in the unit order,
        // and everything with precautions lands on the isolation sheet
        let buckets = report::unit_buckets(&outcome.complete);
        let order: Vec<&str> = buckets.iter().map(|b| b.unit.as_str()).collect();
        assert_eq!(order, ["UCIA", "MEDICINA INTERNA"]);

        let all: Vec<_> = outcome
            .complete
            .iter()
            .chain(outcome.review.iter())
            .cloned()
            .collect();
        assert_eq!(report::active_isolation_records(&all).len(), 3);
    }
}
