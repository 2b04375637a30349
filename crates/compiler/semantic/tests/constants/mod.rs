use super::*;

mod values;
