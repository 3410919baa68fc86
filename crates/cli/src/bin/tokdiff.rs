use anyhow::Result;

fn main() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(tokdiff_cli::main_entry());
    // Timed-out alignments may still be running on the blocking pool.
    runtime.shutdown_background();
    result
}
