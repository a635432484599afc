use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = env::var("OUT_DIR").unwrap();

    // Re-run if units.csv changes
    println!("cargo:rerun-if-changed=units.csv");

    let units = parse_units_csv(&crate_dir);
    check_unique_spellings(&units);

    generate_unit_enum(&units, &out_dir);
    generate_unit_names(&units, &out_dir);
    generate_unit_symbols(&units, &out_dir);
    generate_from_u32(&units, &out_dir);
    generate_lookup(&units, &out_dir);
    generate_all(&units, &out_dir);
    generate_registry(&units, &out_dir);
}

#[derive(Debug, Clone)]
struct UnitDef {
    discriminant: u32,
    dimension: String,
    variant: String,
    name: String,
    symbol: String,
    ratio: String,
    aliases: Vec<String>,
}

impl UnitDef {
    /// Every string that resolves to this unit.
    fn spellings(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        if !self.symbol.is_empty() && self.symbol != self.name {
            out.push(self.symbol.as_str());
        }
        out.extend(self.aliases.iter().map(String::as_str));
        out
    }
}

fn parse_units_csv(crate_dir: &str) -> Vec<UnitDef> {
    let csv_path = PathBuf::from(crate_dir).join("units.csv");
    let content = fs::read_to_string(&csv_path).expect("Failed to read units.csv");

    let mut units = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 7 {
            panic!("Invalid units.csv line (expected 7 columns): {}", line);
        }

        units.push(UnitDef {
            discriminant: parts[0]
                .parse()
                .unwrap_or_else(|_| panic!("Invalid discriminant: {}", parts[0])),
            dimension: parts[1].to_string(),
            variant: parts[2].to_string(),
            name: parts[3].to_string(),
            symbol: parts[4].to_string(),
            ratio: parts[5].to_string(),
            aliases: parts[6]
                .split('|')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        });
    }

    units
}

fn check_unique_spellings(units: &[UnitDef]) {
    let mut seen = HashSet::new();
    let mut discriminants = HashSet::new();
    for unit in units {
        if !discriminants.insert(unit.discriminant) {
            panic!("Duplicate discriminant in units.csv: {}", unit.discriminant);
        }
        for spelling in unit.spellings() {
            if !seen.insert(spelling.to_string()) {
                panic!("Ambiguous unit spelling in units.csv: {}", spelling);
            }
        }
    }
}

fn write_out(out_dir: &str, file: &str, code: String) {
    let dest_path = PathBuf::from(out_dir).join(file);
    fs::write(&dest_path, code).unwrap_or_else(|_| panic!("Failed to write {}", file));
}

fn generate_unit_enum(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("/// Identifier of a unit known to the registry.\n");
    code.push_str("///\n");
    code.push_str("/// Discriminants are assigned in `units.csv` and grouped by dimension.\n");
    code.push_str("#[repr(u32)]\n");
    code.push_str("#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    code.push_str("pub enum UnitId {\n");

    for unit in units {
        if unit.symbol.is_empty() {
            code.push_str(&format!("    /// {}\n", unit.name));
        } else {
            code.push_str(&format!("    /// {} ({})\n", unit.name, unit.symbol));
        }
        code.push_str(&format!("    {} = {},\n", unit.variant, unit.discriminant));
    }

    code.push_str("}\n");
    write_out(out_dir, "unit_id_enum.rs", code);
}

fn generate_unit_names(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("match self {\n");
    for unit in units {
        code.push_str(&format!(
            "    UnitId::{} => \"{}\",\n",
            unit.variant, unit.name
        ));
    }
    code.push_str("}\n");
    write_out(out_dir, "unit_names.rs", code);
}

fn generate_unit_symbols(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("match self {\n");
    for unit in units {
        code.push_str(&format!(
            "    UnitId::{} => \"{}\",\n",
            unit.variant, unit.symbol
        ));
    }
    code.push_str("}\n");
    write_out(out_dir, "unit_symbols.rs", code);
}

fn generate_from_u32(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("match value {\n");
    for unit in units {
        code.push_str(&format!(
            "    {} => Some(UnitId::{}),\n",
            unit.discriminant, unit.variant
        ));
    }
    code.push_str("    _ => None,\n}\n");
    write_out(out_dir, "unit_from_u32.rs", code);
}

fn generate_lookup(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("match s {\n");
    for unit in units {
        let patterns: Vec<String> = unit
            .spellings()
            .iter()
            .map(|s| format!("{:?}", s))
            .collect();
        code.push_str(&format!(
            "    {} => Some(UnitId::{}),\n",
            patterns.join(" | "),
            unit.variant
        ));
    }
    code.push_str("    _ => None,\n}\n");
    write_out(out_dir, "unit_lookup.rs", code);
}

fn generate_all(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("[\n");
    for unit in units {
        code.push_str(&format!("    UnitId::{},\n", unit.variant));
    }
    code.push_str("]\n");
    write_out(out_dir, "unit_all.rs", code);
}

fn generate_registry(units: &[UnitDef], out_dir: &str) {
    let mut code = String::from("// Auto-generated from units.csv\n");
    code.push_str("match id {\n");
    for unit in units {
        code.push_str(&format!("    UnitId::{} => UnitMeta {{\n", unit.variant));
        code.push_str(&format!("        dim: DimensionId::{},\n", unit.dimension));
        code.push_str(&format!("        scale_to_canonical: {},\n", unit.ratio));
        code.push_str(&format!("        name: \"{}\",\n", unit.name));
        code.push_str("    },\n");
    }
    code.push_str("}\n");
    write_out(out_dir, "unit_registry.rs", code);
}
