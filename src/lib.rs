pub mod application {
    pub mod assertions;
    pub mod client;
    pub mod json_path;
    pub mod runner;
    pub mod scenarios;
    pub mod specification;
}

pub mod domain {
    pub mod error;
    pub mod models;
}

pub mod infrastructure {
    pub mod config;
    pub mod logging;
}

pub mod presentation {
    pub mod report;
}
