use std::env;

use anyhow::Context;
use log::info;

use rnn_counter::{
    arch::{
        loss::{LossFn, Mse},
        LinearRnn,
    },
    config::TrainingConfig,
    optimization::Rprop,
    training::Trainer,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => TrainingConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => {
            info!("no config given, using the default one");
            TrainingConfig::default()
        }
    };

    let dataset = config.dataset.build().context("failed to build dataset")?;
    let rprop = Rprop::new(&config.init_step_sizes, config.growth, config.shrink);
    let mut trainer = Trainer::new(dataset.clone(), rprop, Mse, config.iterations);
    let report = trainer.train(config.init_params)?;

    let model = LinearRnn::new(report.params);
    let loss = Mse.loss(model.predict(dataset.x()).view(), dataset.y());

    println!("wx:   {}", report.params.input_weight);
    println!("wrec: {}", report.params.recurrence_weight);
    println!("loss: {loss}");

    for seq in &config.eval {
        let pred = model.predict_sequence(seq);
        println!("{seq:?} -> {pred:.4} (target {})", seq.iter().sum::<f64>());
    }

    Ok(())
}
