pub mod activation_functions;
pub mod backprop;
pub mod cost_functions;
pub mod layers;
pub mod learning_rate;
pub mod network;
pub mod optimizers;
pub mod trainer;
pub mod training_sample;
