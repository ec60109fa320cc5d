mod calculator;
mod map;

pub use calculator::CalculatorService;
pub use map::MapService;
