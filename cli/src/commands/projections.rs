use anyhow::Result;
use laupop::CountryCode;

pub fn run(_cli: &crate::cli::Cli) -> Result<()> {
    for code in CountryCode::all() {
        let projection = code.projection();
        println!("{code}\tEPSG:{}\t{}", projection.epsg, projection.proj4);
    }
    Ok(())
}
