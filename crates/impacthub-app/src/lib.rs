// Application and presentation layers of the ImpactHub client
pub mod application;
pub mod presentation;
