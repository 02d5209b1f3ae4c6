// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Resolve drags and removals on a JSON scene of boxes.
#[derive(Parser, Debug)]
#[command(name = "glue", author, version, about, long_about = None)]
pub struct Cli {
    /// Resolver config JSON file (overrides the config store)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding stored config blobs (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move one entity to a tentative position and resolve collisions
    Drag(DragArgs),
    /// Remove one entity and let whatever rested on it fall into the gap
    Remove(SceneArgs),
    /// Show or store the effective resolver config
    Config(ConfigArgs),
}

/// Scene file plus the entity to act on.
#[derive(Args, Debug)]
pub struct SceneArgs {
    /// Scene file: JSON array of entity descriptors
    #[arg(long, value_name = "FILE")]
    pub scene: PathBuf,

    /// Zero-based index of the entity in the scene array
    #[arg(long, value_name = "INDEX")]
    pub entity: usize,

    /// Links to record before acting, as `parent:child` index pairs
    #[arg(long = "stack", value_name = "PARENT:CHILD", value_parser = parse_link)]
    pub stacks: Vec<(usize, usize)>,
}

/// `drag` arguments.
#[derive(Args, Debug)]
pub struct DragArgs {
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Tentative center as `x,y,z`
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub to: [f32; 3],

    /// Write the resolved scene (descriptor array) to this file
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// `config` arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective config as JSON
    #[arg(long)]
    pub print: bool,

    /// Persist the effective config to the config store
    #[arg(long)]
    pub save: bool,
}

/// Parses `x,y,z` into three floats.
pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got `{s}`"));
    };
    let num = |v: &str| v.parse::<f32>().map_err(|e| format!("`{v}`: {e}"));
    Ok([num(x)?, num(y)?, num(z)?])
}

/// Parses `parent:child` into two indices.
pub fn parse_link(s: &str) -> Result<(usize, usize), String> {
    let (parent, child) = s
        .split_once(':')
        .ok_or_else(|| format!("expected PARENT:CHILD, got `{s}`"))?;
    let idx = |v: &str| v.trim().parse::<usize>().map_err(|e| format!("`{v}`: {e}"));
    Ok((idx(parent)?, idx(child)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_parses_with_spaces_and_negatives() {
        assert_eq!(parse_vec3("1, -2.5,3"), Ok([1.0, -2.5, 3.0]));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn links_parse_as_index_pairs() {
        assert_eq!(parse_link("0:2"), Ok((0, 2)));
        assert!(parse_link("0-2").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
