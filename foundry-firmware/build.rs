//! Build script for foundry-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates furnace.toml and generates the configuration constants

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

// Compiled ceilings; furnace.toml may only tighten these
const FLOOR_MIN_FLOW_LPM: f64 = 1.5;
const CEILING_COIL_TEMP_C: f64 = 60.0;
const CEILING_WATER_TEMP_C: f64 = 35.0;
const CEILING_CRUCIBLE_TEMP_C: f64 = 1600.0;
const MIN_COOLDOWN_S: i64 = 300;

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated furnace.toml contents
struct FurnaceToml {
    min_flow_lpm: f64,
    max_coil_c: f64,
    max_water_c: f64,
    max_crucible_c: f64,
    cooldown_s: i64,
    kp: f64,
    ki: f64,
    kd: f64,
    sample_period_ms: i64,
    rate_limit_c_per_min: f64,
    aluminum_c: f64,
    steel_c: f64,
    pulse_factor: f64,
    window_ms: i64,
    vref: f64,
    adc_counts: i64,
    degrees_per_volt: f64,
    mode: &'static str,
    material: &'static str,
}

/// Read and validate furnace.toml, panicking with every problem found
fn load_config() -> FurnaceToml {
    println!("cargo:rerun-if-changed=furnace.toml");

    let config_path = Path::new("furnace.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: furnace.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a furnace.toml configuration file.        ║\n\
            ║  Please create one in the foundry-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read furnace.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in furnace.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    let mut r = Reader {
        root: &value,
        errors: &mut errors,
    };

    let config = FurnaceToml {
        min_flow_lpm: r.float("interlock", "min_flow_lpm"),
        max_coil_c: r.float("interlock", "max_coil_c"),
        max_water_c: r.float("interlock", "max_water_c"),
        max_crucible_c: r.float("interlock", "max_crucible_c"),
        cooldown_s: r.int("interlock", "cooldown_s"),
        kp: r.float("pid", "kp"),
        ki: r.float("pid", "ki"),
        kd: r.float("pid", "kd"),
        sample_period_ms: r.int("pid", "sample_period_ms"),
        rate_limit_c_per_min: r.float("pid", "rate_limit_c_per_min"),
        aluminum_c: r.float("targets", "aluminum_c"),
        steel_c: r.float("targets", "steel_c"),
        pulse_factor: r.float("flow", "pulse_factor"),
        window_ms: r.int("flow", "window_ms"),
        vref: r.float("thermal", "vref"),
        adc_counts: r.int("thermal", "adc_counts"),
        degrees_per_volt: r.float("thermal", "degrees_per_volt"),
        mode: r.choice("control", "mode", &[("manual", "Manual"), ("auto_pid", "AutoPid")]),
        material: r.choice(
            "control",
            "material",
            &[("aluminum", "Aluminum"), ("steel", "Steel")],
        ),
    };

    validate_limits(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid furnace configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=furnace.toml validated successfully");
    config
}

/// Field accessor that collects errors instead of stopping at the first
struct Reader<'a> {
    root: &'a toml::Value,
    errors: &'a mut Vec<String>,
}

impl<'a> Reader<'a> {
    fn field(&mut self, section: &str, key: &str) -> Option<&'a toml::Value> {
        let value = self.root.get(section).and_then(|s| s.get(key));
        if value.is_none() {
            self.errors.push(format!("[{}] missing '{}'", section, key));
        }
        value
    }

    /// Float field; integers are accepted
    fn float(&mut self, section: &str, key: &str) -> f64 {
        match self.field(section, key) {
            Some(toml::Value::Float(v)) => *v,
            Some(toml::Value::Integer(v)) => *v as f64,
            Some(_) => {
                self.errors.push(format!("[{}] '{}' must be a number", section, key));
                0.0
            }
            None => 0.0,
        }
    }

    fn int(&mut self, section: &str, key: &str) -> i64 {
        match self.field(section, key) {
            Some(toml::Value::Integer(v)) => *v,
            Some(_) => {
                self.errors.push(format!("[{}] '{}' must be an integer", section, key));
                0
            }
            None => 0,
        }
    }

    /// String field mapped onto a Rust variant name
    fn choice(&mut self, section: &str, key: &str, options: &[(&str, &'static str)]) -> &'static str {
        let fallback = options[0].1;
        let value = match self.field(section, key) {
            Some(toml::Value::String(s)) => s.clone(),
            Some(_) => {
                self.errors.push(format!("[{}] '{}' must be a string", section, key));
                return fallback;
            }
            None => return fallback,
        };

        match options.iter().find(|(name, _)| *name == value) {
            Some((_, variant)) => *variant,
            None => {
                let names: Vec<&str> = options.iter().map(|(name, _)| *name).collect();
                self.errors.push(format!(
                    "[{}] {} must be one of: {}",
                    section,
                    key,
                    names.join(", ")
                ));
                fallback
            }
        }
    }
}

/// Reject anything that loosens the compiled safety ceilings
fn validate_limits(c: &FurnaceToml, errors: &mut Vec<String>) {
    // NaN fails every comparison, so checks are written as "must hold"
    if !(c.min_flow_lpm >= FLOOR_MIN_FLOW_LPM) {
        errors.push(format!("[interlock] min_flow_lpm must be >= {}", FLOOR_MIN_FLOW_LPM));
    }
    if !(c.max_coil_c <= CEILING_COIL_TEMP_C) {
        errors.push(format!("[interlock] max_coil_c must be <= {}", CEILING_COIL_TEMP_C));
    }
    if !(c.max_water_c <= CEILING_WATER_TEMP_C) {
        errors.push(format!("[interlock] max_water_c must be <= {}", CEILING_WATER_TEMP_C));
    }
    if !(c.max_crucible_c <= CEILING_CRUCIBLE_TEMP_C) {
        errors.push(format!(
            "[interlock] max_crucible_c must be <= {}",
            CEILING_CRUCIBLE_TEMP_C
        ));
    }
    if c.cooldown_s < MIN_COOLDOWN_S || c.cooldown_s > u32::MAX as i64 {
        errors.push(format!("[interlock] cooldown_s must be >= {}", MIN_COOLDOWN_S));
    }

    if c.sample_period_ms <= 0 || c.sample_period_ms > u32::MAX as i64 {
        errors.push("[pid] sample_period_ms must be positive".to_string());
    }
    if c.window_ms <= 0 || c.window_ms > u32::MAX as i64 {
        errors.push("[flow] window_ms must be positive".to_string());
    }
    if !(c.pulse_factor > 0.0) {
        errors.push("[flow] pulse_factor must be positive".to_string());
    }
    if !(c.rate_limit_c_per_min > 0.0) {
        errors.push("[pid] rate_limit_c_per_min must be positive".to_string());
    }

    if !(c.vref > 0.0) || !(c.degrees_per_volt > 0.0) {
        errors.push("[thermal] vref and degrees_per_volt must be positive".to_string());
    }
    if c.adc_counts <= 0 || c.adc_counts > u16::MAX as i64 {
        errors.push("[thermal] adc_counts must be 1-65535".to_string());
    }

    for (key, target) in [("aluminum_c", c.aluminum_c), ("steel_c", c.steel_c)] {
        if !(target <= c.max_crucible_c) {
            errors.push(format!("[targets] {} must not exceed max_crucible_c", key));
        }
    }
}

/// Write `furnace_config.rs` into OUT_DIR
fn generate_config(c: &FurnaceToml) {
    let mut out = String::new();
    out.push_str("// Generated by build.rs from furnace.toml\n\n");

    let floats = [
        ("MIN_FLOW_LPM", c.min_flow_lpm),
        ("MAX_COIL_C", c.max_coil_c),
        ("MAX_WATER_C", c.max_water_c),
        ("MAX_CRUCIBLE_C", c.max_crucible_c),
        ("PID_KP", c.kp),
        ("PID_KI", c.ki),
        ("PID_KD", c.kd),
        ("RATE_LIMIT_C_PER_MIN", c.rate_limit_c_per_min),
        ("TARGET_ALUMINUM_C", c.aluminum_c),
        ("TARGET_STEEL_C", c.steel_c),
        ("FLOW_PULSE_FACTOR", c.pulse_factor),
        ("THERMAL_VREF", c.vref),
        ("THERMAL_DEGREES_PER_VOLT", c.degrees_per_volt),
    ];
    for (name, value) in floats {
        writeln!(out, "pub const {}: f32 = {:?}_f32;", name, value).unwrap();
    }

    let ints = [
        ("COOLDOWN_S", "u32", c.cooldown_s),
        ("PID_SAMPLE_PERIOD_MS", "u32", c.sample_period_ms),
        ("FLOW_WINDOW_MS", "u32", c.window_ms),
        ("THERMAL_ADC_COUNTS", "u16", c.adc_counts),
    ];
    for (name, ty, value) in ints {
        writeln!(out, "pub const {}: {} = {};", name, ty, value).unwrap();
    }

    writeln!(out, "pub const CONTROL_MODE: ControlMode = ControlMode::{};", c.mode).unwrap();
    writeln!(out, "pub const MATERIAL: Material = Material::{};", c.material).unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("furnace_config.rs"), out).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
