//! Property tests for the statistical and geometric invariants.

use proptest::prelude::*;
use serde_json::{Value, json};
use sheet_insights::chart::ChartData;
use sheet_insights::correlation::pearson;
use sheet_insights::legend::entries;
use sheet_insights::pie::PieLayout;
use sheet_insights::quality::assess;
use sheet_insights::scene::CanvasSize;
use sheet_insights::stats::DescriptiveStats;
use sheet_insights::table::Table;
use sheet_insights::view::{ChartKind, ChartViewState, ViewAction};

fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1e6..1e6f64, min_len..=max_len)
}

fn paired(min_len: usize, max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (min_len..=max_len).prop_flat_map(|n| {
        (
            proptest::collection::vec(-1e6..1e6f64, n),
            proptest::collection::vec(-1e6..1e6f64, n),
        )
    })
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-100i64..100).prop_map(|n| json!(n)),
        "[a-c]{0,2}".prop_map(Value::String),
    ]
}

fn action() -> impl Strategy<Value = ViewAction> {
    prop_oneof![
        Just(ViewAction::RotateLeft),
        Just(ViewAction::RotateRight),
        Just(ViewAction::ZoomIn),
        Just(ViewAction::ZoomOut),
        Just(ViewAction::Reset),
        (-2.0..3.0f64).prop_map(ViewAction::SetTilt),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn correlation_is_symmetric_and_bounded((x, y) in paired(2, 60)) {
        let r = pearson(&x, &y);
        prop_assert_eq!(r, pearson(&y, &x));
        prop_assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn variance_is_non_negative(values in finite_vec(1, 100)) {
        let stats = DescriptiveStats::from_values(&values).unwrap();
        prop_assert!(stats.variance >= 0.0);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.q1 <= stats.q3);
    }

    #[test]
    fn quality_percentages_are_bounded(rows in proptest::collection::vec(proptest::collection::vec(cell(), 3), 0..40)) {
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let table = Table::from_grid(&headers, &rows, 1000).unwrap();
        for profile in assess(&table).per_column {
            prop_assert!((0.0..=100.0).contains(&profile.completeness));
            prop_assert!((0.0..=100.0).contains(&profile.uniqueness));
            prop_assert!((0.0..=100.0).contains(&profile.outlier_percentage));
        }
    }

    #[test]
    fn pie_partitions_the_circle(values in proptest::collection::vec(0.01..1e4f64, 1..30)) {
        let labels = (0..values.len()).map(|i| i.to_string()).collect();
        let data = ChartData::new(labels, values).unwrap();
        let layout = PieLayout::compute(&data, &ChartViewState::default(), CanvasSize::default());

        let sweep: f64 = layout.slices.iter().map(|s| s.sweep).sum();
        let share: f64 = layout.slices.iter().map(|s| s.percentage).sum();
        prop_assert!((sweep - std::f64::consts::TAU).abs() < 1e-9);
        prop_assert!((share - 100.0).abs() < 1e-9);
        for pair in layout.slices.windows(2) {
            prop_assert!((pair[0].end_angle() - pair[1].start_angle).abs() < 1e-9);
        }
        prop_assert_eq!(entries(&data).len(), data.len());
    }

    #[test]
    fn view_state_stays_in_range(actions in proptest::collection::vec(action(), 0..50), pie in any::<bool>()) {
        let kind = if pie { ChartKind::Pie } else { ChartKind::Column };
        let state = ChartViewState::default().replay(actions, kind);
        prop_assert!((0.0..std::f64::consts::TAU).contains(&state.rotation));
        prop_assert!((0.2..=1.0).contains(&state.tilt_angle));
        match kind {
            ChartKind::Pie => prop_assert!((0.5..=2.0).contains(&state.zoom)),
            ChartKind::Column => prop_assert!(state.zoom >= 0.1),
        }
    }
}
