#[cfg(test)]
mod tests {
    use epi_census::models::{IsolationRecord, PatientRecord, ReconciledRecord, PENDING};
    use epi_census::reconcile::reconcile;
    use epi_census::ReconcilerConfig;

    fn patient(bed: &str, registration: &str, name: &str, unit: &str) -> PatientRecord {
        PatientRecord {
            bed: bed.to_string(),
            registration: registration.to_string(),
            name: name.to_string(),
            sex: "F".to_string(),
            age: "52".to_string(),
            diagnosis: "A41.9".to_string(),
            admission_date: "03/02/2026".to_string(),
            unit: unit.to_string(),
        }
    }

    fn isolation(bed: &str, registration: &str, name: &str, types: &[&str]) -> IsolationRecord {
        IsolationRecord {
            bed: bed.to_string(),
            registration: registration.to_string(),
            name: name.to_string(),
            precaution_types: types.iter().map(ToString::to_string).collect(),
            end_date: None,
        }
    }

    fn assert_partition_invariant(outcome: &epi_census::ReconciliationOutcome) {
        for record in &outcome.complete {
            assert!(!record.needs_review());
        }
        for record in &outcome.review {
            assert!(record.needs_review());
        }
    }

    #[test]
    fn matched_patient_takes_census_bed_and_isolation_precautions() {
        let patients = vec![patient("1201", "123456", "ANA PÉREZ", "MEDICINA INTERNA")];
        let isolations = vec![isolation("0999", "123456", "A. PEREZ", &["Contact", "Droplet"])];
        let outcome = reconcile(&patients, &isolations, &ReconcilerConfig::default());

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.review.len(), 0);
        let record = &outcome.complete[0];
        // Census refreshed same-day, its bed and name win
        assert_eq!(record.bed.as_deref(), Some("1201"));
        assert_eq!(record.patient_name.as_deref(), Some("ANA PÉREZ"));
        assert_eq!(record.precautions.as_slice(), ["Contact", "Droplet"]);
        assert_partition_invariant(&outcome);
    }

    #[test]
    fn isolation_only_patient_lands_in_review() {
        let patients = vec![patient("1201", "123456", "ANA PÉREZ", "MEDICINA INTERNA")];
        let isolations = vec![isolation("2020", "555111", "MARIO SOTO", &["Contact"])];
        let outcome = reconcile(&patients, &isolations, &ReconcilerConfig::default());

        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.review.len(), 1);
        let record = &outcome.review[0];
        assert_eq!(record.registration, "555111");
        assert_eq!(record.bed.as_deref(), Some("2020"));
        assert_eq!(record.patient_name.as_deref(), Some("MARIO SOTO"));
        assert!(record.sex.is_none());
        assert!(record.age.is_none());
        assert!(record.admission_date.is_none());

        // The export row renders the unresolved demographics as pending
        let row = record.to_report_row();
        assert_eq!(row[3], PENDING);
        assert_eq!(row[4], PENDING);
        assert_eq!(row[5], PENDING);
        assert_partition_invariant(&outcome);
    }

    #[test]
    fn critical_units_get_the_baseline_profile() {
        let config = ReconcilerConfig::default();
        let patients = vec![
            patient("7302", "111222", "EVA RUIZ", "UCIA"),
            patient("1201", "333444", "RAUL LUNA", "MEDICINA INTERNA"),
        ];
        let outcome = reconcile(&patients, &[], &config);

        let by_reg = |reg: &str| -> &ReconciledRecord {
            outcome
                .complete
                .iter()
                .find(|r| r.registration == reg)
                .unwrap()
        };
        assert_eq!(
            by_reg("111222").precautions.as_slice(),
            [config.baseline_precaution.clone()]
        );
        assert!(by_reg("333444").precautions.is_empty());
    }

    #[test]
    fn no_record_is_dropped_for_being_one_sided() {
        let patients = vec![
            patient("1201", "111111", "A", "MEDICINA INTERNA"),
            patient("1202", "222222", "B", "MEDICINA INTERNA"),
        ];
        let isolations = vec![
            isolation("1201", "111111", "A", &["Contact"]),
            isolation("3030", "999999", "C", &["Droplet"]),
        ];
        let outcome = reconcile(&patients, &isolations, &ReconcilerConfig::default());
        assert_eq!(outcome.len(), 3);

        let registrations: Vec<&str> = outcome
            .complete
            .iter()
            .chain(outcome.review.iter())
            .map(|r| r.registration.as_str())
            .collect();
        assert!(registrations.contains(&"111111"));
        assert!(registrations.contains(&"222222"));
        assert!(registrations.contains(&"999999"));
    }

    #[test]
    fn join_trims_registration_before_matching() {
        let patients = vec![patient("1201", " 123456 ", "ANA PÉREZ", "MEDICINA INTERNA")];
        let isolations = vec![isolation("1201", "123456", "ANA PÉREZ", &["Contact"])];
        let outcome = reconcile(&patients, &isolations, &ReconcilerConfig::default());
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.complete[0].precautions.as_slice(), ["Contact"]);
    }

    #[test]
    fn isolation_only_unit_resolves_from_bed_prefix() {
        let isolations = vec![isolation("7302", "555111", "MARIO SOTO", &["Contact"])];
        let outcome = reconcile(&[], &isolations, &ReconcilerConfig::default());
        assert_eq!(outcome.review.len(), 1);
        assert_eq!(outcome.review[0].unit, "UCIA");
    }
}
