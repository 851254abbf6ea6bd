#![allow(dead_code)]

pub mod tables;
