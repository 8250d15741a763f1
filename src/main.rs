use anyhow::Result;

fn main() -> Result<()> {
    tmda_search::cli::run()
}
