use serde::{Deserialize, Serialize};

use super::{Relu, Sigmoid, Tanh};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFn {
    Sigmoid,
    Tanh,
    Relu,
}

impl ActFn {
    pub fn f(&self, x: f32) -> f32 {
        match self {
            ActFn::Sigmoid => Sigmoid.f(x),
            ActFn::Tanh => Tanh.f(x),
            ActFn::Relu => Relu.f(x),
        }
    }

    pub fn df(&self, x: f32) -> f32 {
        match self {
            ActFn::Sigmoid => Sigmoid.df(x),
            ActFn::Tanh => Tanh.df(x),
            ActFn::Relu => Relu.df(x),
        }
    }
}

/// `1 / (1 + e^(-x))`.
pub fn sigmoid(x: f32) -> f32 {
    Sigmoid.f(x)
}

pub fn tanh(x: f32) -> f32 {
    Tanh.f(x)
}

pub fn relu(x: f32) -> f32 {
    Relu.f(x)
}
