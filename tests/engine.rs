use ferrite_lite::train::{evaluate, train_epoch};
use ferrite_lite::{train_loop, Activation, MemoryBudget, Network, TrainConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build(budget: &mut MemoryBudget, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = Network::new();
    network.append_layer(budget, 3, Activation::None);
    network
        .append_layer(budget, 4, Activation::LeakyReLU)
        .randomize(&mut rng, false);
    network
        .append_layer(budget, 2, Activation::Sigmoid)
        .randomize(&mut rng, true);
    network
}

fn dataset() -> (Vec<Vec<f32>>, Vec<Vec<f32>>) {
    let inputs = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
    ];
    let targets = vec![
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ];
    (inputs, targets)
}

#[test]
fn three_four_two_scenario() {
    let mut budget = MemoryBudget::new(4096);
    let mut network = build(&mut budget, 42);

    assert_eq!(network.layer(0).unwrap().wcount(), 0);
    assert_eq!(network.layer(1).unwrap().wcount(), 12);
    assert_eq!(network.layer(2).unwrap().wcount(), 8);

    network.set_input(&[1.0, 0.0, 0.0]);
    network.forward();
    let first = network.output().to_vec();
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|&v| v > 0.0 && v < 1.0));

    network.forward();
    assert_eq!(network.output(), first.as_slice());

    network.teardown(&mut budget);
    assert_eq!(budget.cur_alloc(), 0);
}

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.cml");

    let mut budget = MemoryBudget::new(4096);
    let mut original = build(&mut budget, 9);
    original.set_input(&[0.5, 0.25, 1.0]);
    original.forward();
    original.save(&path).unwrap();

    let mut restored = Network::load(&mut budget, &path).unwrap();
    assert_eq!(restored.len(), original.len());
    for (a, b) in original.iter().zip(restored.iter()) {
        assert_eq!(a.activation(), b.activation());
        assert_eq!(a.count(), b.count());
        assert_eq!(a.data(), b.data());
        assert_eq!(a.bias(), b.bias());
        assert_eq!(a.weights(), b.weights());
    }

    // Same parameters and inputs, same outputs.
    restored.forward();
    original.forward();
    assert_eq!(restored.output(), original.output());

    restored.teardown(&mut budget);
    original.teardown(&mut budget);
    assert_eq!(budget.cur_alloc(), 0);
}

#[test]
fn load_rejects_foreign_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello, world").unwrap();

    let mut budget = MemoryBudget::new(4096);
    assert!(Network::load(&mut budget, &path).is_err());
    assert_eq!(budget.cur_alloc(), 0);
}

#[test]
fn shared_budget_accounts_every_network() {
    let mut budget = MemoryBudget::new(4096);
    let (inputs, targets) = dataset();

    let mut a = build(&mut budget, 1);
    let b = build(&mut budget, 2);
    assert_eq!(budget.cur_alloc(), a.allocated_bytes() + b.allocated_bytes());

    train_epoch(&mut a, &mut budget, &inputs, &targets, 0.5);
    assert_eq!(budget.cur_alloc(), a.allocated_bytes() + b.allocated_bytes());
    assert!(budget.cur_alloc() <= budget.max_alloc());

    b.teardown(&mut budget);
    assert_eq!(budget.cur_alloc(), a.allocated_bytes());
    a.teardown(&mut budget);
    assert_eq!(budget.cur_alloc(), 0);
}

#[test]
fn independent_budgets_do_not_interfere() {
    let mut first = MemoryBudget::new(4096);
    let mut second = MemoryBudget::new(4096);
    let a = build(&mut first, 1);
    assert_eq!(second.cur_alloc(), 0);
    let b = build(&mut second, 1);
    assert_eq!(first.cur_alloc(), second.cur_alloc());
    a.teardown(&mut first);
    b.teardown(&mut second);
}

#[test]
fn training_lowers_error() {
    let mut budget = MemoryBudget::new(4096);
    let mut network = build(&mut budget, 2024);
    let (inputs, targets) = dataset();

    let before = evaluate(&mut network, &inputs, &targets);
    let config = TrainConfig::new(1000, 0.5);
    train_loop(&mut network, &mut budget, &inputs, &targets, &config);
    let after = evaluate(&mut network, &inputs, &targets);

    assert!(after < before, "mse went from {before} to {after}");
    network.teardown(&mut budget);
}

#[test]
#[should_panic(expected = "memory budget exhausted")]
fn backward_deltas_count_against_budget() {
    // Exactly enough room for the parameters, none for the deltas.
    let mut budget = MemoryBudget::new((3 + 3 + 4 + 4 + 12 + 2 + 2 + 8) * 4);
    let mut network = build(&mut budget, 5);
    network.forward();
    network.backward(&mut budget, &[1.0, 0.0], 0.5);
}
