pub mod day_16;
