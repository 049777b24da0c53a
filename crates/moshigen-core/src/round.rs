//! A generation round over every target type and registration.
//!
//! Each target type is generated in isolation: an error is recorded against
//! that type and the round moves on. A type's units are all built before the
//! first one is handed to the sink and are persisted all or none, so a
//! failing type leaves nothing behind.

use crate::config::GeneratorConfig;
use crate::emit::{EmittedUnit, emit_target};
use crate::error::{GenerateError, GenerateResult};
use crate::model::{FactoryRegistration, TargetType};
use crate::registry::{ConsistencyWarning, check_consistency, emit_aggregate_factory};
use crate::sink::CodeSink;
use crate::strategy::DecodePlan;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn};

/// A unit handed to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Qualified name of the generated class
    pub name: String,
    /// Qualified name of the target type, or the registration's factory name
    pub origin: String,
}

/// Elapsed time of one round phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTiming {
    pub phase: &'static str,
    pub elapsed: Duration,
}

/// Outcome of a round
#[derive(Debug, Default)]
pub struct RoundReport {
    pub generated: Vec<GeneratedUnit>,
    pub plans: Vec<DecodePlan>,
    pub failures: Vec<GenerateError>,
    pub warnings: Vec<ConsistencyWarning>,
    /// Filled only when performance tracing is on
    pub timings: Vec<PhaseTiming>,
}

impl RoundReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of target types whose adapter was persisted
    pub fn adapter_count(&self) -> usize {
        self.plans.len()
    }
}

/// Drives every target type and registration through generation
#[derive(Debug, Clone)]
pub struct GenerationRound {
    config: GeneratorConfig,
    trace_performance: bool,
}

impl GenerationRound {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            trace_performance: false,
        }
    }

    /// Record and log elapsed time per phase
    pub fn trace_performance(mut self, enabled: bool) -> Self {
        self.trace_performance = enabled;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn run(
        &self,
        targets: &[TargetType],
        registrations: &[FactoryRegistration],
        sink: &mut dyn CodeSink,
    ) -> RoundReport {
        let mut report = RoundReport::default();
        let round_start = Instant::now();

        let start = Instant::now();
        let mut succeeded: Vec<&TargetType> = Vec::new();
        for target in targets {
            let span = info_span!("target", name = %target.qualified_name);
            let _enter = span.enter();

            let persisted = emit_target(target, &self.config).and_then(|emitted| {
                let origin = &target.qualified_name;
                persist_units(&mut *sink, emitted.units, origin, &mut report.generated)?;
                Ok(emitted.plan)
            });

            match persisted {
                Ok(plan) => {
                    report.plans.push(plan);
                    succeeded.push(target);
                }
                Err(err) => {
                    error!(error = %err, "failed to generate adapter");
                    report.failures.push(err);
                }
            }
        }
        self.record(&mut report, "data classes", start);

        let start = Instant::now();
        for registration in registrations {
            let span = info_span!("factory", name = %registration.target_class_name);
            let _enter = span.enter();

            let persisted = emit_aggregate_factory(registration, targets, &self.config)
                .and_then(|unit| {
                    let origin = unit.qualified_name();
                    persist_units(&mut *sink, vec![unit], &origin, &mut report.generated)
                });

            if let Err(err) = persisted {
                error!(error = %err, "failed to generate factory");
                report.failures.push(err);
            }
        }
        self.record(&mut report, "factories", start);

        report.warnings = check_consistency(&succeeded, registrations);
        for warning in &report.warnings {
            warn!(type_name = warning.type_name(), "{warning}");
        }

        if self.trace_performance {
            info!(
                adapters = report.adapter_count(),
                factories = registrations.len(),
                "generated classes"
            );
        }
        self.record(&mut report, "round", round_start);

        report
    }

    fn record(&self, report: &mut RoundReport, phase: &'static str, start: Instant) {
        if !self.trace_performance {
            return;
        }
        let elapsed = start.elapsed();
        info!(
            phase,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "==PERFORMANCE== phase finished"
        );
        report.timings.push(PhaseTiming { phase, elapsed });
    }
}

/// Hand `units` to the sink together; nothing is recorded unless all of
/// them persist.
fn persist_units(
    sink: &mut dyn CodeSink,
    units: Vec<EmittedUnit>,
    origin: &str,
    generated: &mut Vec<GeneratedUnit>,
) -> GenerateResult<()> {
    let names: Vec<_> = units.iter().map(|u| (u.qualified_name(), u.kind)).collect();
    sink.persist_all(
        units
            .into_iter()
            .map(|unit| (unit.package, unit.type_spec))
            .collect(),
    )?;

    for (name, kind) in names {
        info!(unit = %name, kind = %kind, "generated");
        generated.push(GeneratedUnit {
            name,
            origin: origin.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "round/round_tests.rs"]
mod round_tests;
