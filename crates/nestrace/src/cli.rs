//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nestrace::{Field, Layout};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when the traces diverge.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for parse, bounds or I/O errors.
pub const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "nestrace")]
#[command(about = "NES trace comparator - finds where an emulator log diverges from a reference log")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare an emulator trace against a reference trace
    Compare {
        /// Trace written by the emulator under test
        #[arg(value_name = "ACTUAL")]
        actual: PathBuf,

        /// Reference trace (Nintendulator debug log or nestest.log)
        #[arg(value_name = "EXPECTED")]
        expected: PathBuf,

        #[command(flatten)]
        compare: CompareArgs,
    },
    /// Print the maximum and leading values of an index list file
    Index {
        /// File whose first line holds the index list
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Number of leading values to print
        #[arg(long, default_value_t = nestrace::index::DEFAULT_HEAD)]
        head: usize,
    },
}

/// Comparison policy arguments.
#[derive(Args, Clone, Debug)]
pub struct CompareArgs {
    /// Fields to compare (comma-separated: pc,a,x,y,p,sp,cyc,sc)
    #[arg(long, default_value = "pc,a,x,y,p,sp", conflicts_with = "preset")]
    pub fields: String,

    /// Preset field set
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Column layout of the emulator trace
    #[arg(long, value_enum, default_value = "emulator")]
    pub actual_layout: ActualLayoutArg,

    /// Column layout of the reference trace
    #[arg(long, value_enum, default_value = "reference")]
    pub expected_layout: ExpectedLayoutArg,

    /// Lines to skip in the reference trace (applied from --offset-start on)
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// First emulator line at which --offset applies
    #[arg(long, default_value = "0")]
    pub offset_start: usize,

    /// Fields compared from --offset-start on, in place of --fields/--preset
    #[arg(long, value_name = "FIELDS")]
    pub offset_fields: Option<String>,

    /// Mask applied to the status register before comparing (hex)
    #[arg(long, value_name = "HEX", default_value = "EF")]
    pub mask_p: String,

    /// Compare the status register unmasked
    #[arg(long)]
    pub no_mask_p: bool,

    /// Scanline sentinel remap applied before comparing
    #[arg(long, value_name = "FROM:TO", default_value = "-1:261")]
    pub scanline_sentinel: String,

    /// Compare scanlines without remapping the sentinel
    #[arg(long)]
    pub no_scanline_remap: bool,
}

/// Common field sets.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PresetArg {
    /// Program counter and registers
    Registers,
    /// Cycle counter only
    Cycles,
    /// Program counter only
    Pc,
}

impl PresetArg {
    pub fn fields(self) -> Vec<Field> {
        match self {
            Self::Registers => Field::REGISTERS.to_vec(),
            Self::Cycles => vec![Field::Cyc],
            Self::Pc => vec![Field::Pc],
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ActualLayoutArg {
    /// `PC:.... A:.. ... CYC:nnn SL:nnn`
    Emulator,
    /// Cycle counter runs to end of line, no scanline
    EmulatorOpenCycles,
}

impl From<ActualLayoutArg> for Layout {
    fn from(arg: ActualLayoutArg) -> Self {
        match arg {
            ActualLayoutArg::Emulator => Self::emulator(),
            ActualLayoutArg::EmulatorOpenCycles => Self::emulator_open_cycles(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExpectedLayoutArg {
    /// nestest.log / Nintendulator debug log with `CYC:nnn SL:nnn`
    Reference,
    /// Cycle counter runs to end of line, no scanline
    ReferenceOpenCycles,
}

impl From<ExpectedLayoutArg> for Layout {
    fn from(arg: ExpectedLayoutArg) -> Self {
        match arg {
            ExpectedLayoutArg::Reference => Self::reference(),
            ExpectedLayoutArg::ReferenceOpenCycles => Self::reference_open_cycles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_compare() {
        let cli = Cli::try_parse_from([
            "nestrace",
            "compare",
            "dk.log",
            "dk.debug",
            "--preset",
            "cycles",
            "--offset",
            "1",
            "--offset-start",
            "42595",
            "--offset-fields",
            "pc",
        ])
        .unwrap();
        let Commands::Compare {
            actual, compare, ..
        } = cli.command
        else {
            panic!("expected compare command");
        };
        assert_eq!(actual, PathBuf::from("dk.log"));
        assert_eq!(compare.offset, 1);
        assert_eq!(compare.offset_start, 42595);
        assert_eq!(compare.offset_fields.as_deref(), Some("pc"));
        assert!(matches!(compare.preset, Some(PresetArg::Cycles)));
    }

    #[test]
    fn test_cli_fields_conflict_with_preset() {
        let result = Cli::try_parse_from([
            "nestrace", "compare", "a", "b", "--fields", "pc", "--preset", "cycles",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_index_default_head() {
        let cli = Cli::try_parse_from(["nestrace", "index", "index.txt"]).unwrap();
        assert!(matches!(cli.command, Commands::Index { head: 500, .. }));
    }
}
