use anyhow::Context;
use clap::Parser;
use sqd_fixed_binary::BuilderOptions;


#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CLI {
    /// JSON file with an array of base64 strings, byte lists and nulls
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Byte width of array items
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Builder options file, e.g. {"byteWidth": 32, "capacity": 1000}
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<String>,

    /// Number of items to preallocate
    #[arg(long, default_value = "0")]
    pub capacity: usize,

    /// Print decoded array back as JSON
    #[arg(long)]
    pub encode: bool
}


impl CLI {
    pub fn builder_options(&self) -> anyhow::Result<BuilderOptions> {
        if let Some(file) = self.options.as_ref() {
            let data = std::fs::read(file)
                .with_context(|| format!("failed to read {}", file))?;
            let options = serde_json::from_slice(&data)
                .context("failed to parse builder options")?;
            return Ok(options)
        }
        let width = self.width.context("either --width or --options must be specified")?;
        Ok(BuilderOptions::new(width).with_capacity(self.capacity))
    }
}
