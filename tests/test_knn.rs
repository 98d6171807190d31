use ictal::knn::{round_winner, vote, Votes};
use ictal::{classify, ClassifierConfig, FeatureVector, LabeledPoint, PointClass, ReferencePopulation};

fn point(v: [f64; 3], class: PointClass) -> LabeledPoint {
    LabeledPoint::new(FeatureVector(v), class)
}

#[test]
fn empty_population_resolves_to_late_every_round() {
    let cfg = ClassifierConfig::default();
    let q = FeatureVector::new(0.3, 0.2, 0.9);
    let pop = ReferencePopulation::new();

    assert_eq!(round_winner(100.0, 100.0, 100.0), PointClass::LateIctal);
    assert_eq!(vote(&q, &pop, &cfg), Votes { interictal: 0, early: 0, late: 10 });

    let s = classify(&q, &pop, &cfg);
    assert_eq!((s.ictal, s.early), (1.0, 0.0));
}

#[test]
fn one_point_per_class_query_on_interictal() {
    // Interictal wins the first round at distance 0, then its list is all
    // sentinel padding: early (0.1) beats late (0.2), and the remaining
    // all-sentinel rounds go to late.
    let q = [0.5, 0.5, 0.5];
    let pop = ReferencePopulation::from_points([
        point(q, PointClass::Interictal),
        point([0.6, 0.5, 0.5], PointClass::EarlyIctal),
        point([0.7, 0.5, 0.5], PointClass::LateIctal),
    ]);
    let cfg = ClassifierConfig::default();
    assert_eq!(vote(&FeatureVector(q), &pop, &cfg), Votes { interictal: 1, early: 1, late: 8 });

    let s = classify(&FeatureVector(q), &pop, &cfg);
    assert_eq!((s.ictal, s.early), (0.9, 0.1));
}

#[test]
fn interictal_wins_every_round_with_k_matching_points() {
    let q = [0.5, 0.5, 0.5];
    let mut points: Vec<LabeledPoint> = (0..10).map(|_| point(q, PointClass::Interictal)).collect();
    points.push(point([0.6, 0.5, 0.5], PointClass::EarlyIctal));
    points.push(point([0.7, 0.5, 0.5], PointClass::LateIctal));
    let pop = ReferencePopulation::from_points(points);

    let s = classify(&FeatureVector(q), &pop, &ClassifierConfig::default());
    assert_eq!((s.ictal, s.early), (0.0, 0.0));
}

#[test]
fn early_cluster_scores_fully_ictal_and_early() {
    let pop = ReferencePopulation::from_points(
        (0..10)
            .map(|i| point([0.9, 0.1, 0.8 + i as f64 * 0.001], PointClass::EarlyIctal))
            .chain((0..10).map(|i| point([0.1, 0.1, 0.2 + i as f64 * 0.001], PointClass::Interictal)))
            .chain((0..10).map(|i| point([0.6, 0.4, 0.5 + i as f64 * 0.001], PointClass::LateIctal))),
    );
    let s = classify(&FeatureVector::new(0.9, 0.1, 0.8), &pop, &ClassifierConfig::default());
    assert_eq!((s.ictal, s.early), (1.0, 1.0));
}

#[test]
fn population_order_does_not_matter() {
    let pts = vec![
        point([0.1, 0.2, 0.3], PointClass::Interictal),
        point([0.4, 0.1, 0.3], PointClass::EarlyIctal),
        point([0.2, 0.2, 0.2], PointClass::Interictal),
        point([0.8, 0.3, 0.9], PointClass::LateIctal),
        point([0.5, 0.5, 0.5], PointClass::EarlyIctal),
    ];
    let q = FeatureVector::new(0.3, 0.3, 0.3);
    let cfg = ClassifierConfig::default();
    let forward = classify(&q, &ReferencePopulation::from_points(pts.clone()), &cfg);
    let reversed = classify(&q, &ReferencePopulation::from_points(pts.into_iter().rev()), &cfg);
    assert_eq!(forward, reversed);
}

#[test]
fn smaller_k_counts_fewer_rounds() {
    let pop = ReferencePopulation::from_points([point([0.0, 0.0, 0.0], PointClass::Interictal)]);
    let cfg = ClassifierConfig { k: 2, ..ClassifierConfig::default() };
    let v = vote(&FeatureVector::new(0.0, 0.0, 0.0), &pop, &cfg);
    assert_eq!(v, Votes { interictal: 1, early: 0, late: 1 });
    let s = classify(&FeatureVector::new(0.0, 0.0, 0.0), &pop, &cfg);
    assert_eq!((s.ictal, s.early), (0.5, 0.0));
}
