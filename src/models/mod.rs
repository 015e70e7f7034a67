pub mod fertilizer;
pub mod health;
pub mod irrigation;
pub mod price;
pub mod recommendation;
pub mod sensor;
pub mod soil;

pub use fertilizer::*;
pub use health::*;
pub use irrigation::*;
pub use price::*;
pub use recommendation::*;
pub use sensor::*;
pub use soil::*;
