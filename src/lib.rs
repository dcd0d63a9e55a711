//! # Flowgen
//!
//! Flowgen turns a natural-language request into an executable workflow
//! graph of typed tool nodes (search, crawl, extract, map, qa) connected
//! by directed edges, for a downstream execution engine to run.
//!
//! ## Core Features
//!
//! - **Tiered Resolution**: a primary chat-completion resolver, a
//!   secondary AI-answer resolver, and a deterministic heuristic matcher
//!   tried strictly in order
//! - **Guaranteed Result**: the heuristic tier is total, so generation
//!   always terminates with a valid, connected graph even when every
//!   remote dependency fails
//! - **Validated Output**: remote graphs are checked against the
//!   node/edge invariants before being accepted
//! - **Stateless**: one generator instance serves any number of
//!   concurrent requests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowgen::{Config, GeneratorBuilder};
//!
//! let generator = GeneratorBuilder::new().config(Config::from_env()).build();
//!
//! let graph = generator.generate("summarize top 5 news from https://n.com").await;
//! println!("{}", graph.to_json()?);
//! ```

mod builder;
mod config;
mod error;
mod generator;
mod heuristic;
mod model;
mod resolver;

pub use builder::GeneratorBuilder;
pub use config::{AnswerConfig, ChatConfig, Config};
pub use error::FlowgenError;
pub use generator::FlowGenerator;
pub use heuristic::HeuristicMatcher;
pub use model::*;
pub use resolver::{AnswerResolver, ChatResolver, Resolver, ResolverKind};

/// Result type alias for Flowgen operations.
pub type Result<T> = std::result::Result<T, FlowgenError>;
