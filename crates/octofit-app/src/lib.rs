// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod descriptor;
pub mod filter;
pub mod normalize;
pub mod record;
pub mod resource;
pub mod screen;
pub mod state;

pub use descriptor::*;
pub use filter::*;
pub use normalize::*;
pub use record::*;
pub use resource::*;
pub use screen::*;
pub use state::*;
