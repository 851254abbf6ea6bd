#![allow(dead_code)]

pub mod processes;
