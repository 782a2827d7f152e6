use airbot::{
    config::Config,
    gateway::Gateway,
    location, logging, norms,
    query::{self, Query},
};
use color_eyre::Result;
use tracing::info;

const HELP: &str = "airbot - Polish air quality readings (data: GIOŚ, api.gios.gov.pl)

  airbot air <id>         readings from the station with the given id; e.g. airbot air 10955
  airbot loc <lat> <lon>  readings from the station closest to the coordinates; e.g. airbot loc 54.35 18.6667
  airbot here             readings from the station closest to this machine (IP geolocation)
  airbot stations         ids and names of all available stations
  airbot types            measured pollutants and their norms
  airbot help             this message";

#[tokio::main]
async fn main() -> Result<()> {
    // Instrumentation and safety
    let _log_guard = logging::initialize_logging();
    color_eyre::install()?;

    let config = Config::load();
    let gateway = Gateway::new(config.api.base_url.clone(), config.proxy_settings());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    info!("command: {:?}", args);

    let reply = match args.as_slice() {
        ["air", id] => query::answer(&gateway, Query::ById(id.to_string())).await,
        ["loc", lat, lon] => {
            let query = Query::ByCoordinates(lat.to_string(), lon.to_string());
            query::answer(&gateway, query).await
        }
        ["here"] => {
            let (lat, lon) = location::get_current_location().await;
            query::answer(&gateway, Query::ByDeviceLocation(lat, lon)).await
        }
        ["stations"] => query::catalog_listing(&gateway).await,
        ["types"] => norms::reference_text(),
        _ => HELP.to_string(),
    };

    println!("{reply}");
    Ok(())
}
