use clap::Parser;

/// Default average fragment size used for the nM conversion
pub const DEFAULT_FRAGMENT_SIZE: &str = "620bp";

/// Command-line arguments for sparkquant
#[derive(Parser, Debug, Clone)]
#[command(name = "sparkquant")]
#[command(
    about = "A CLI tool for assigning Tecan Spark concentrations to LIMS samples"
)]
#[command(
    long_about = "Takes an output file from the Tecan Spark and sets the relevant \
    concentration UDF on the samples in the step."
)]
#[command(version)]
pub struct Args {
    /// LIMS ID for the current process
    #[arg(long, value_name = "ID")]
    pub pid: String,

    /// The concentration UDF to set
    #[arg(long = "concentrationUdf", value_name = "UDF")]
    pub concentration_udf: String,

    /// LIMS name of the Spark file uploaded to the process
    #[arg(long = "sparkOutputFilename", value_name = "NAME")]
    pub spark_output_filename: String,

    /// Convert the parsed concentrations from ng/ul to nM as well
    #[arg(long = "convertToNm")]
    pub convert_to_nm: bool,

    /// The average fragment size of the DNA, if converting to nM
    #[arg(
        long = "fragmentSize",
        value_name = "SIZE",
        default_value = DEFAULT_FRAGMENT_SIZE
    )]
    pub fragment_size: String,

    /// The nM concentration UDF to set, required with --convertToNm
    #[arg(long = "concentrationUdfNm", value_name = "UDF")]
    pub concentration_udf_nm: Option<String>,

    /// LIMS credentials file
    #[arg(long, value_name = "PATH", env = "SPARKQUANT_CONFIG")]
    pub config: Option<String>,

    /// LIMS base URI, overrides the configuration file
    #[arg(long, value_name = "URI", env = "LIMS_BASEURI")]
    pub baseuri: Option<String>,

    /// LIMS API username, overrides the configuration file
    #[arg(long, value_name = "USER", env = "LIMS_USERNAME")]
    pub username: Option<String>,

    /// LIMS API password, overrides the configuration file
    #[arg(long, value_name = "PASSWORD", env = "LIMS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Preview assignments without writing to the LIMS
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for the assignment report: text or json
    #[arg(long = "output-format", value_name = "FORMAT", default_value = "text")]
    pub output_format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "sparkquant",
        "--pid",
        "24-1234",
        "--concentrationUdf",
        "QuantIt HS Concentration",
        "--sparkOutputFilename",
        "Spark HighSens File",
    ];

    #[test]
    fn test_parse_required_flags() {
        let args = Args::try_parse_from(REQUIRED).unwrap();

        assert_eq!(args.pid, "24-1234");
        assert_eq!(args.concentration_udf, "QuantIt HS Concentration");
        assert_eq!(args.spark_output_filename, "Spark HighSens File");
        assert!(!args.convert_to_nm);
        assert_eq!(args.fragment_size, "620bp");
        assert!(args.concentration_udf_nm.is_none());
        assert_eq!(args.output_format, "text");
    }

    #[test]
    fn test_parse_conversion_flags() {
        let mut argv = REQUIRED.to_vec();
        argv.extend([
            "--convertToNm",
            "--fragmentSize",
            "450 bp",
            "--concentrationUdfNm",
            "QuantIt HS Concentration (nM)",
        ]);
        let args = Args::try_parse_from(argv).unwrap();

        assert!(args.convert_to_nm);
        assert_eq!(args.fragment_size, "450 bp");
        assert_eq!(
            args.concentration_udf_nm.as_deref(),
            Some("QuantIt HS Concentration (nM)")
        );
    }

    #[test]
    fn test_missing_pid() {
        let result = Args::try_parse_from([
            "sparkquant",
            "--concentrationUdf",
            "Conc",
            "--sparkOutputFilename",
            "Spark",
        ]);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--pid"));
    }
}
