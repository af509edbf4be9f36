use serde_json::{Value, json};
use spotilist::{
    management::PlaylistWriter,
    types::{
        ArtistRef, ExternalUrls, PlaylistDetail, PlaylistDocument, PlaylistItem, Track, TracksRef,
    },
};
use tempfile::tempdir;

fn item(name: &str, artists: &[&str], url: Option<&str>) -> PlaylistItem {
    PlaylistItem {
        track: Some(Track {
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| ArtistRef {
                    name: a.to_string(),
                })
                .collect(),
            external_urls: ExternalUrls {
                spotify: url.map(str::to_string),
            },
        }),
    }
}

fn road_trip() -> (PlaylistDetail, Vec<PlaylistItem>) {
    let playlist = PlaylistDetail {
        id: "abc123".to_string(),
        name: "Road Trip".to_string(),
        tracks: TracksRef { total: 2 },
    };
    let items = vec![
        item("Song A", &["Artist X"], Some("http://x/a")),
        item("Song B", &["Artist Y", "Artist Z"], Some("http://x/b")),
    ];
    (playlist, items)
}

#[tokio::test]
async fn test_write_road_trip_example() {
    let dir = tempdir().unwrap();
    let (playlist, items) = road_trip();
    let document = PlaylistDocument::from_playlist(&playlist, &items);

    let path = PlaylistWriter::new(dir.path())
        .write("user42", &document)
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("user42").join("abc123.json"));

    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({
            "id": "abc123",
            "name": "Road Trip",
            "totalTracks": 2,
            "tracks": [
                {"name": "Song A", "artists": ["Artist X"], "url": "http://x/a"},
                {"name": "Song B", "artists": ["Artist Y", "Artist Z"], "url": "http://x/b"}
            ]
        })
    );
}

#[tokio::test]
async fn test_write_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let writer = PlaylistWriter::new(dir.path());
    let (mut playlist, items) = road_trip();

    writer
        .write("user42", &PlaylistDocument::from_playlist(&playlist, &items))
        .await
        .unwrap();

    playlist.name = "Road Trip 2".to_string();
    let path = writer
        .write("user42", &PlaylistDocument::from_playlist(&playlist, &items[..1]))
        .await
        .unwrap();

    let parsed: PlaylistDocument =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.name, "Road Trip 2");
    assert_eq!(parsed.tracks.len(), 1);
}

#[test]
fn test_document_skips_missing_tracks() {
    let (playlist, mut items) = road_trip();
    items.insert(1, PlaylistItem { track: None });
    items.push(item("Local file", &[], None));

    let document = PlaylistDocument::from_playlist(&playlist, &items);

    let names: Vec<&str> = document.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Song A", "Song B", "Local file"]);
    assert!(document.tracks[2].artists.is_empty());
    assert_eq!(document.tracks[2].url, "");
    // The declared total comes from the playlist, not the written tracks
    assert_eq!(document.total_tracks, 2);
}

#[test]
fn test_path_for() {
    let writer = PlaylistWriter::new("/data");
    assert_eq!(
        writer.path_for("me", "p1"),
        std::path::PathBuf::from("/data/me/p1.json")
    );
}
