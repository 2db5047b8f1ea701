// Colour classifier demo.
//
// Loads `color_model.cml` when it exists; otherwise trains a
// 3 -> 12 (LeakyReLU) -> 9 (Sigmoid) network on nine reference colours
// and saves it. Then classifies one unseen colour.
//
//   RUST_LOG=debug cargo run --release

use ferrite_lite::{
    network::argmax, train_loop, Activation, MemoryBudget, Network, TrainConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MODEL_PATH: &str = "color_model.cml";
const MAX_ALLOC: usize = 1048;

const LABELS: [&str; 9] = [
    "red", "orange", "yellow", "green", "blue", "pink", "purple", "white", "black",
];

const SAMPLES: [[f32; 3]; 9] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.6, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.4, 0.0, 0.4],
    [1.0, 1.0, 1.0],
    [0.0, 0.0, 0.0],
];

fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

fn build(budget: &mut MemoryBudget) -> Network {
    let mut rng = StdRng::from_entropy();
    let mut network = Network::new();
    network.append_layer(budget, 3, Activation::None);
    network
        .append_layer(budget, 12, Activation::LeakyReLU)
        .randomize(&mut rng, false);
    network
        .append_layer(budget, LABELS.len(), Activation::Sigmoid)
        .randomize(&mut rng, true);
    network
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut budget = MemoryBudget::new(MAX_ALLOC);

    let (mut network, trained) = match Network::load(&mut budget, MODEL_PATH) {
        Ok(network) => {
            log::info!("model found at {MODEL_PATH}");
            (network, false)
        }
        Err(e) => {
            log::info!("no usable model ({e}), falling back on training");
            (build(&mut budget), true)
        }
    };
    log::info!("{}/{} bytes used", budget.cur_alloc(), budget.max_alloc());

    if trained {
        let inputs: Vec<Vec<f32>> = SAMPLES.iter().map(|s| s.to_vec()).collect();
        let targets: Vec<Vec<f32>> = (0..LABELS.len())
            .map(|i| (0..LABELS.len()).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let loss = train_loop(&mut network, &mut budget, &inputs, &targets, &TrainConfig::default());
        log::info!("final training loss {loss:.6}");
    }

    let input = rgb(54, 247, 118);
    network.set_input(&input);
    network.forward();

    for (i, v) in input.iter().enumerate() {
        println!("in[{i}] = {v:.6}");
    }
    for (i, v) in network.output().iter().enumerate() {
        println!("out[{i}] = {v:.6}");
    }
    let prediction = LABELS.get(argmax(network.output())).copied().unwrap_or("unknown");
    println!("prediction: {prediction}");

    if trained {
        if let Err(e) = network.save(MODEL_PATH) {
            log::error!("could not save {MODEL_PATH}: {e}");
        }
    }
    network.teardown(&mut budget);
}
