pub mod demo;
pub mod selftest;
