use fixednn::{network, Matrix, Vector};
use fixednn::nn::backprop::Backprop;
use fixednn::nn::cost_functions::MeanSquaredError;
use fixednn::nn::layers::{activation::{Relu, Tanh}, linear::Linear, print::Print};
use fixednn::nn::learning_rate::LearningRate;
use fixednn::nn::network::Network;
use fixednn::nn::trainer::{train_network, TrainingHyperParameters};
use fixednn::nn::training_sample::TrainingSample;
use fixednn::prettify::*;

fn main() -> fixednn::Result<()> {
    // Fixed weights, no training involved.
    let constant: Network<Vector<2>, _> = network![
        Linear::<2, 4>::from_flat([1., -2., -3., -4., 5., 6., -7., -8.], [0., 1., 0., 1.]),
        Relu::relu(),
        Print::new("HIDDEN:"),
        Linear::<4, 1>::from_flat([-1., -2., 2., 1.], [1.]),
        Relu::relu(),
    ];
    print_labeled("CONSTANT NETWORK OUTPUT:", &constant.forward(&Matrix::column_vector([1., 1.])));

    let samples = [
        TrainingSample::<2, 1>::from_arrays([0., 0.], [0.]),
        TrainingSample::from_arrays([0., 1.], [1.]),
        TrainingSample::from_arrays([1., 0.], [1.]),
        TrainingSample::from_arrays([1., 1.], [0.]),
    ];

    let mut xor: Network<Vector<2>, _> = network![
        Linear::<2, 8>::zeroed(),
        Tanh::tanh(),
        Linear::<8, 1>::zeroed(),
    ];
    xor.init();

    let tp = TrainingHyperParameters {
        total_epochs: 2000,
        batch_size: 4,
        learning_rate: LearningRate::with_decay(0.2, 0.9995),
        report_every: 250,
    };

    println!("{BOLD}-Training XOR-{RESET}");
    let mut backprop = Backprop::new(&mut xor, MeanSquaredError);
    let history = train_network(&mut backprop, &samples, &tp, &mut rand::thread_rng())?;
    let seconds: f32 = history.iter().map(|stats| stats.seconds).sum();
    println!("Trained {} epochs in {seconds:.3}s", history.len());

    for sample in &samples {
        let prediction = *xor.forward(sample.input()).at(0, 0);
        let target = *sample.expected().at(0, 0);
        let color = if (prediction - target).abs() < 0.25 { BRIGHT_GREEN } else { BRIGHT_RED };
        println!(
            "{} xor {} -> {color}{prediction:.3}{RESET}",
            sample.input().at(0, 0),
            sample.input().at(1, 0)
        );
    }

    xor.print();
    Ok(())
}
