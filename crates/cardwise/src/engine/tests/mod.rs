mod common;

mod combos;
mod service;
mod single;
