use crate::error::{Error as SlotnameError, Result as SlotnameResult};
use crate::il::{Procedure, SlotId, SlotKind, TypeUnit};
use crate::naming::{assign_names, NamingContext, NamingReport, NamingSettings};
use rayon::prelude::*;
use std::fmt::Write;
use std::path::PathBuf;

/// Arguments for the name command
#[derive(Debug, Clone)]
pub struct NameArgs {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub no_debug_symbols: bool,
    pub keywords: bool,
    pub format: String,
}

impl NameArgs {
    /// Settings from the config file (if any) with command-line overrides applied
    pub fn to_settings(&self) -> SlotnameResult<NamingSettings> {
        let mut settings = match &self.config_path {
            Some(path) => NamingSettings::from_file(path)?,
            None => NamingSettings::default(),
        };
        if self.no_debug_symbols {
            settings.use_debug_symbols = false;
        }
        Ok(settings)
    }
}

/// Run the name subcommand
pub fn name(args: &NameArgs) -> SlotnameResult<()> {
    if args.format != "text" && args.format != "json" {
        return Err(SlotnameError::InvalidArgs {
            message: format!(
                "unknown output format '{}' (expected text or json)",
                args.format
            ),
        });
    }

    let mut unit = TypeUnit::from_file(&args.input_path)?;
    unit.validate()?;
    let settings = args.to_settings()?;

    let reports = name_unit(&mut unit, settings, args.keywords);
    log::info!(
        "named {} slots across {} procedures",
        reports.iter().map(|r| r.assignments.len()).sum::<usize>(),
        reports.len()
    );

    let output = match args.format.as_str() {
        "json" => unit.to_json()?,
        _ => render_text(&unit, &reports),
    };
    super::utils::write_output(&output, args.output_path.as_deref())
}

/// Name every procedure of `unit`, each with its own ledger, in parallel
pub fn name_unit(
    unit: &mut TypeUnit,
    settings: NamingSettings,
    keywords: bool,
) -> Vec<NamingReport> {
    let resolver = unit.method_table();
    if resolver.is_empty() {
        log::debug!("{}: no resolved methods, call arguments stay unnamed", unit.type_name);
    }
    let mut context = NamingContext::new(&resolver)
        .with_fields(unit.fields.iter().cloned())
        .with_reserved(unit.reserved_names.iter().cloned())
        .with_settings(settings);
    if keywords {
        context = context.with_keywords();
    }

    unit.procedures
        .par_iter_mut()
        .map(|procedure| assign_names(procedure, &context))
        .collect()
}

/// One block per procedure, one line per slot
pub fn render_text(unit: &TypeUnit, reports: &[NamingReport]) -> String {
    let mut out = String::new();
    for (procedure, report) in unit.procedures.iter().zip(reports) {
        render_procedure(&mut out, &unit.type_name, procedure, report);
    }
    out.trim_end().to_string()
}

fn render_procedure(
    out: &mut String,
    type_name: &str,
    procedure: &Procedure,
    report: &NamingReport,
) {
    if type_name.is_empty() {
        let _ = writeln!(out, "{}", procedure.name);
    } else {
        let _ = writeln!(out, "{}::{}", type_name, procedure.name);
    }
    for (index, slot) in procedure.slots.iter().enumerate() {
        let kind = match slot.kind {
            SlotKind::Parameter => "param",
            SlotKind::Local => "local",
        };
        let origin = match report.source_of(SlotId(index)) {
            Some(source) => source.to_string(),
            None if slot.is_generated => "generated".to_string(),
            None => "declared".to_string(),
        };
        let _ = writeln!(
            out,
            "  slot{:<3} {:<5} {:<24} {:<16} ({})",
            index,
            kind,
            slot.name.as_deref().unwrap_or("?"),
            slot.ty.to_string(),
            origin
        );
    }
}
