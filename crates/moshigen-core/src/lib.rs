//! moshigen-core - Type-directed generation of Moshi JSON adapters
//!
//! Given the constructor of a Java data-holder class, this crate emits a
//! `JsonAdapter` that decodes it field by field:
//! - [`model`] describes target types and their constructor parameters
//! - [`extract`] picks the designated constructor and its fields
//! - [`strategy`] chooses how each field is read ([`DecodePlan`])
//! - [`type_expr`] builds reified type expressions for nested adapters
//! - [`emit`] lowers a plan into [`java`] type specs
//! - [`registry`] builds aggregate factories and checks registrations
//! - [`round`] runs a whole batch into a [`CodeSink`]
//!
//! ```
//! use moshigen_core::prelude::*;
//!
//! let point = TargetType::new("com.example.Point")
//!     .in_package("com.example")
//!     .with_constructor(Constructor::new(vec![
//!         Parameter::new("x", TypeDescriptor::parse("int").unwrap()),
//!         Parameter::new("y", TypeDescriptor::parse("int").unwrap()),
//!     ]));
//!
//! let mut sink = MemorySink::new("\t");
//! let report = GenerationRound::new(GeneratorConfig::default()).run(&[point], &[], &mut sink);
//!
//! assert!(report.is_success());
//! assert!(sink.source("com.example.PointAdapter").unwrap().contains("case \"x\":"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod java;
pub mod model;
pub mod naming;
pub mod registry;
pub mod round;
pub mod sink;
pub mod strategy;
pub mod type_expr;

pub use config::GeneratorConfig;
pub use emit::{EmittedTarget, EmittedUnit, UnitKind, emit_target};
pub use error::{GenerateError, GenerateResult, VisibilityViolation};
pub use model::{
    Constructor, FactoryRegistration, Field, GenerateFlags, Parameter, PrimitiveKind, TargetType,
    TypeDescriptor, TypeParseError, Visibility,
};
pub use registry::ConsistencyWarning;
pub use round::{GenerationRound, RoundReport};
pub use sink::{CodeSink, FileSink, MemorySink};
pub use strategy::{DecodePlan, DecodeStrategy};
pub use type_expr::TypeExpr;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CodeSink, ConsistencyWarning, Constructor, DecodePlan, FactoryRegistration, FileSink,
        GenerateError, GenerateFlags, GenerateResult, GenerationRound, GeneratorConfig,
        MemorySink, Parameter, RoundReport, TargetType, TypeDescriptor,
    };
}
