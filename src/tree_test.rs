#[cfg(test)]
mod tests {
    use crate::tree::{
        Condition, TreeObservation, YearStats, concerning, for_year, yearly_stats, years,
    };

    #[test]
    fn test_condition_labels() {
        assert_eq!(Condition::from_label("枯死"), Condition::Dead);
        assert_eq!(Condition::from_label("立ち枯れ"), Condition::Withering);
        assert_eq!(Condition::from_label("虫害"), Condition::PestDamage);
        assert_eq!(Condition::from_label("健全"), Condition::Healthy);
        assert_eq!(Condition::from_label(" Dead "), Condition::Dead);
        assert_eq!(Condition::from_label(""), Condition::Unknown);
        assert_eq!(Condition::from_label("something else"), Condition::Unknown);
        assert_eq!(Condition::PestDamage.to_string(), "PestDamage");
    }

    #[test]
    fn test_concerning_conditions() {
        let concerning_set = [Condition::Dead, Condition::Withering, Condition::PestDamage];
        for c in [
            Condition::Healthy,
            Condition::NeedsObservation,
            Condition::PestDamage,
            Condition::Withering,
            Condition::Dead,
            Condition::BrokenBranch,
            Condition::Unknown,
        ] {
            assert_eq!(c.is_concerning(), concerning_set.contains(&c), "{}", c);
        }
    }

    #[test]
    fn test_year_filters() {
        let trees = vec![
            TreeObservation::new("A", 2020, 35.0, 139.0, Condition::Dead),
            TreeObservation::new("A", 2021, 35.0, 139.0, Condition::Healthy),
            TreeObservation::new("B", 2021, 35.1, 139.0, Condition::PestDamage),
            TreeObservation::new("C", 2019, 35.2, 139.0, Condition::BrokenBranch),
        ];

        assert_eq!(years(&trees), vec![2019, 2020, 2021]);

        let y2021 = for_year(&trees, 2021);
        assert_eq!(y2021.len(), 2);
        assert!(y2021.iter().all(|t| t.year == 2021));

        let bad = concerning(&y2021);
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].key(), ("B", 2021));
    }

    #[test]
    fn test_yearly_stats() {
        let trees = vec![
            TreeObservation::new("A", 2023, 35.0, 139.0, Condition::Healthy),
            TreeObservation::new("B", 2023, 35.0, 139.0, Condition::Healthy),
            TreeObservation::new("C", 2023, 35.0, 139.0, Condition::PestDamage),
            TreeObservation::new("D", 2023, 35.0, 139.0, Condition::BrokenBranch),
            TreeObservation::new("A", 2024, 35.0, 139.0, Condition::Dead),
            TreeObservation::new("B", 2024, 35.0, 139.0, Condition::Withering),
            TreeObservation::new("C", 2024, 35.0, 139.0, Condition::PestDamage),
            TreeObservation::new("D", 2024, 35.0, 139.0, Condition::NeedsObservation),
        ];

        let stats = yearly_stats(&trees);
        assert_eq!(stats.len(), 2);

        let y2023 = &stats[0];
        assert_eq!(y2023.year, 2023);
        assert_eq!(y2023.total, 4);
        assert_eq!(y2023.counts.len(), 7);
        assert_eq!(y2023.count(Condition::Healthy), 2);
        assert_eq!(y2023.count(Condition::Dead), 0);
        assert_eq!(y2023.problem(), 1);
        assert_eq!(y2023.healthy_rate(), 50.0);
        assert_eq!(y2023.problem_rate(), 25.0);

        let y2024 = &stats[1];
        assert_eq!(y2024.year, 2024);
        assert_eq!(y2024.problem(), 3);
        assert_eq!(y2024.healthy_rate(), 0.0);
        assert_eq!(y2024.problem_rate(), 75.0);
    }

    #[test]
    fn test_year_without_observations() {
        let trees = vec![TreeObservation::new("A", 2024, 35.0, 139.0, Condition::Dead)];
        let stats = YearStats::for_year(&trees, 2030);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.problem(), 0);
        assert_eq!(stats.healthy_rate(), 0.0);
        assert_eq!(stats.problem_rate(), 0.0);

        assert!(yearly_stats(&[]).is_empty());
    }
}
