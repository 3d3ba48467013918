use dotenvy::dotenv;
use pandora_web::{client::PandoraClient, FragmentOptions, FRAGMENT_REQUEST_REASON_NORMAL};

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
    let station = stations.first().expect("account has no stations");
    println!("Playing from {}", station.name().unwrap_or("?"));

    let options = FragmentOptions::new()
        .audio_format("aacplus")
        .fragment_request_reason(FRAGMENT_REQUEST_REASON_NORMAL);

    let tracks = station
        .get_random_tracks(true, options)
        .await
        .expect("failed to get tracks");

    for track in tracks {
        let artist = track.artist();
        let album = track.album();

        println!(
            "{} - {} ({}) {:?}",
            artist.name.unwrap_or("?"),
            track.title().unwrap_or("?"),
            album.title.unwrap_or("?"),
            track.length()
        );

        if let Some(audio_url) = track.audio_url() {
            println!("  {audio_url}");
        }
    }
}
