use clap::{Parser, Subcommand, ValueEnum};
use rust_qr_encoder::encoder::bch::{decode_format, decode_version};
use rust_qr_encoder::encoder::function_patterns::{format_bit_positions, version_bit_positions};
use rust_qr_encoder::encoder::mask::penalty_score;
use rust_qr_encoder::encoder::tables::{data_codewords, rs_block_groups, total_codewords};
use rust_qr_encoder::{
    DataSegment, ECLevel, EncodeOptions, MaskPattern, Mode, QRCode, QrEncoder, QrError, Version,
};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "RustQR encoder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Auto,
    Numeric,
    Alphanumeric,
    Byte,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and print the chosen version, mask and penalty
    Encode {
        #[arg(long)]
        data: String,
        #[arg(long, value_enum, default_value = "auto")]
        mode: ModeArg,
        #[arg(long, default_value = "M", value_parser = parse_ec_level)]
        ec: ECLevel,
        /// Type number 1-40, 0 picks the smallest that fits
        #[arg(long, default_value_t = 0)]
        version: u8,
        #[arg(long)]
        mask: Option<u8>,
        /// Print the module matrix
        #[arg(long)]
        dump: bool,
    },
    /// Show the Reed-Solomon block layout for a version and level
    Blocks {
        #[arg(long)]
        version: u8,
        #[arg(long, default_value = "M", value_parser = parse_ec_level)]
        ec: ECLevel,
    },
    /// Show the detected mode, the smallest version at each level, and the
    /// metadata read back from the encoded grid
    Inspect {
        #[arg(long)]
        data: String,
        #[arg(long, default_value = "M", value_parser = parse_ec_level)]
        ec: ECLevel,
    },
}

fn parse_ec_level(s: &str) -> Result<ECLevel, QrError> {
    s.parse()
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Encode {
            data,
            mode,
            ec,
            version,
            mask,
            dump,
        } => encode_cmd(&data, mode, ec, version, mask, dump),
        Command::Blocks { version, ec } => blocks_cmd(version, ec),
        Command::Inspect { data, ec } => inspect_cmd(&data, ec),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn segment_for(data: &str, mode: ModeArg) -> Result<DataSegment, QrError> {
    match mode {
        ModeArg::Auto => Ok(DataSegment::auto(data)),
        ModeArg::Numeric => DataSegment::numeric(data),
        ModeArg::Alphanumeric => DataSegment::alphanumeric(data),
        ModeArg::Byte => Ok(DataSegment::text(data)),
    }
}

fn encode_cmd(
    data: &str,
    mode: ModeArg,
    ec_level: ECLevel,
    version: u8,
    mask: Option<u8>,
    dump: bool,
) -> Result<(), QrError> {
    let mask = mask.map(MaskPattern::try_from).transpose()?;
    let mut encoder = QrEncoder::with_options(EncodeOptions {
        version,
        ec_level,
        mask,
    });
    encoder.add_segment(segment_for(data, mode)?);

    let code = encoder.encode()?;
    println!(
        "version={} size={} ec={:?} mask={} penalty={}",
        code.version,
        code.size(),
        code.error_correction,
        code.mask_pattern.bits(),
        penalty_score(&code.modules)
    );
    if dump {
        print_matrix(&code);
    }
    Ok(())
}

fn print_matrix(code: &QRCode) {
    const QUIET: usize = 4;
    let size = code.size();
    let blank = "  ".repeat(size + 2 * QUIET);
    for _ in 0..QUIET {
        println!("{blank}");
    }
    for row in code.to_cell_data() {
        let mut line = "  ".repeat(QUIET);
        for dark in row {
            line.push_str(if dark { "██" } else { "  " });
        }
        line.push_str(&"  ".repeat(QUIET));
        println!("{line}");
    }
    for _ in 0..QUIET {
        println!("{blank}");
    }
}

fn blocks_cmd(version: u8, ec_level: ECLevel) -> Result<(), QrError> {
    let version = Version::new(version)?;
    println!(
        "version {version} level {ec_level:?}: {} total codewords, {} data codewords",
        total_codewords(version),
        data_codewords(version, ec_level)?
    );
    for (i, group) in rs_block_groups(version, ec_level)?.iter().enumerate() {
        println!(
            "  group {}: {} x (total={}, data={}, ec={})",
            i + 1,
            group.count,
            group.total_count,
            group.data_count,
            group.total_count - group.data_count
        );
    }
    Ok(())
}

fn inspect_cmd(data: &str, ec: ECLevel) -> Result<(), QrError> {
    let segment = DataSegment::auto(data);
    let mode = segment.mode();
    println!(
        "mode={} chars={} data_bits={}",
        mode_name(mode),
        segment.char_count(),
        segment.data_bits()
    );
    for ec_level in ECLevel::ALL {
        let mut encoder = QrEncoder::new(0, ec_level);
        encoder.add_segment(segment.clone());
        match encoder.resolve_version() {
            Ok(version) => println!(
                "  {ec_level:?}: version {version} ({} data codewords)",
                data_codewords(version, ec_level)?
            ),
            Err(err) => println!("  {ec_level:?}: {err}"),
        }
    }

    let mut encoder = QrEncoder::new(0, ec);
    encoder.add_segment(segment);
    let code = encoder.encode()?;
    let size = code.size();

    let mut format = [0u16; 2];
    for i in 0..15 {
        for (copy, (x, y)) in format_bit_positions(size, i).into_iter().enumerate() {
            if code.is_dark(x, y) {
                format[copy] |= 1 << i;
            }
        }
    }
    for (copy, word) in format.iter().enumerate() {
        match decode_format(*word) {
            Some((level, mask)) => println!(
                "format copy {copy}: {word:015b} -> level {level:?} mask {}",
                mask.bits()
            ),
            None => println!("format copy {copy}: {word:015b} -> invalid"),
        }
    }

    if code.version.has_version_info() {
        let mut version = [0u32; 2];
        for i in 0..18 {
            for (copy, (x, y)) in version_bit_positions(size, i).into_iter().enumerate() {
                if code.is_dark(x, y) {
                    version[copy] |= 1 << i;
                }
            }
        }
        for (copy, word) in version.iter().enumerate() {
            match decode_version(*word) {
                Some(v) => println!("version copy {copy}: {word:018b} -> {v}"),
                None => println!("version copy {copy}: {word:018b} -> invalid"),
            }
        }
    }
    Ok(())
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Numeric => "numeric",
        Mode::AlphaNumeric => "alphanumeric",
        Mode::Byte8 => "byte",
    }
}
