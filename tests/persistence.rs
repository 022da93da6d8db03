use neural_engine::{
    ActFn, MlErr, Network, NetworkRecord, datasets, generate_rng, training::Sample,
};

fn probes() -> Vec<Vec<f64>> {
    vec![
        vec![0., 0., 0.],
        vec![1., -1., 0.5],
        vec![-2.5, 3., 0.25],
        vec![10., 10., -10.],
    ]
}

#[test]
fn trained_networks_survive_a_json_round_trip() {
    let data: neural_engine::Dataset = (0..20)
        .map(|i| {
            let x = i as f64 / 10.;
            Sample::new(vec![x, -x, x * x], vec![x.sin(), x.cos()])
        })
        .collect();

    for act_fn in ActFn::NAMES.map(|name| ActFn::from_name(name).unwrap()) {
        let mut rng = generate_rng(Some(3));
        let mut net = Network::new(vec![3, 6, 4, 2], act_fn, 0.05, &mut rng).unwrap();
        net.train_batch(&data, 25, 4, true, &mut rng).unwrap();

        let restored = Network::from_json(&net.to_json().unwrap()).unwrap();
        assert_eq!(restored.layers(), net.layers());
        assert_eq!(restored.act_fn(), act_fn);
        assert_eq!(restored.learning_rate(), net.learning_rate());

        for x in probes() {
            let expected = net.predict(&x).unwrap();
            let got = restored.predict(&x).unwrap();

            for (a, b) in expected.iter().zip(&got) {
                assert!((a - b).abs() < 1e-9, "{act_fn}: {a} vs {b}");
            }
        }
    }
}

#[test]
fn restored_networks_keep_training_identically() {
    let mut rng = generate_rng(Some(12));
    let mut net = Network::new(vec![2, 4, 1], ActFn::sigmoid(), 0.1, &mut rng).unwrap();
    let mut restored = Network::from_json(&net.to_json().unwrap()).unwrap();

    let data = datasets::xor();
    let ea = net.train_batch(&data, 10, 0, false, &mut rng).unwrap();
    let eb = restored.train_batch(&data, 10, 0, false, &mut rng).unwrap();

    assert_eq!(ea, eb);
    assert_eq!(net, restored);
}

#[test]
fn records_convert_both_ways() {
    let mut rng = generate_rng(Some(5));
    let net = Network::new(vec![4, 2], ActFn::leaky_relu(), 0.2, &mut rng).unwrap();

    let record = NetworkRecord::from(&net);
    let back = Network::try_from(&record).unwrap();
    assert_eq!(back, net);

    let pretty = net.to_json_pretty().unwrap();
    assert!(pretty.contains("\"learningRate\""));
    assert_eq!(Network::from_json(&pretty).unwrap(), net);
}

#[test]
fn hand_written_records_load() {
    let json = r#"{
        "layers": [2, 1],
        "weights": [[[1.0], [1.0]]],
        "biases": [[-1.5]],
        "activation": "relu",
        "learningRate": 0.1
    }"#;

    let net = Network::from_json(json).unwrap();
    assert_eq!(net.architecture(), "2-1");
    assert_eq!(net.predict(&[1., 1.]).unwrap(), [0.5]);
    assert_eq!(net.predict(&[1., 0.]).unwrap(), [0.]);
}

#[test]
fn diverged_networks_cannot_be_restored() {
    let json = r#"{
        "layers": [1, 1],
        "weights": [[[null]]],
        "biases": [[0.0]],
        "activation": "sigmoid",
        "learningRate": 0.1
    }"#;

    assert!(matches!(Network::from_json(json), Err(MlErr::Json(_))));
}
