use dotenvy::dotenv;
use pandora_web::client::PandoraClient;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let mut client = PandoraClient::new().expect("failed to build Pandora client");
    let user = client
        .login(
            &std::env::var("PANDORA_USERNAME").expect("Pandora username not in environment"),
            &std::env::var("PANDORA_PASSWORD").expect("Pandora password not in environment"),
        )
        .await
        .expect("failed to log in");

    let stations = user.get_stations().await.expect("failed to get stations");
    println!("{} stations", stations.len());

    for (id, station) in stations.iter() {
        println!(
            "{id}: {} [{}]{}",
            station.name().unwrap_or("?"),
            station.genres().join(", "),
            if station.thumbprint().unwrap_or(false) { " (thumbprint)" } else { "" }
        );
    }
}
