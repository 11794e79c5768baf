use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use floor_navigator::catalog::{builtin, parse_catalog};
use floor_navigator::diagram::{markers, InteractiveElement, PointerEvent};
use floor_navigator::error::{FetchError, ViewerError};
use floor_navigator::fetch::{FetchWorker, FileSource, HttpSource, LoadRequest};
use floor_navigator::viewer::{
    failure_message, ClickTarget, DiagramRegion, InfoPanel, LoadOutcome, MapViewer,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FLOOR_1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 800 400">
  <rect id="outline" x="0" y="0" width="800" height="400"/>
  <g id="room-101">
    <rect x="10" y="10" width="200" height="150"/>
    <text x="110" y="85">101</text>
  </g>
  <rect id="room-102" x="220" y="10" width="200" height="150"/>
  <rect id="stairs-a" x="430" y="10" width="80" height="150"/>
  <rect id="entrance-main" x="520" y="300" width="120" height="90"/>
  <rect id="corridor" x="10" y="170" width="780" height="120"/>
</svg>"#;

const FLOOR_2: &str = r#"<svg viewBox="0 0 800 400">
  <rect id="room-201" x="10" y="10" width="200" height="150"/>
  <rect id="room-202" x="220" y="10" width="200" height="150"/>
</svg>"#;

/// Map directory with floors 1 and 2; floor 3 and 4 are missing.
fn map_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    let maps = dir.path().join("maps");
    fs::create_dir(&maps).unwrap();
    fs::write(maps.join("floor-1.svg"), FLOOR_1).unwrap();
    fs::write(maps.join("floor-2.svg"), FLOOR_2).unwrap();
    dir
}

fn fetch(viewer: &mut MapViewer, root: &Path, request: LoadRequest) -> LoadOutcome {
    let response = request.resolve(&FileSource::new(root));
    viewer.complete_load(response)
}

fn open(root: &Path, floor: u32) -> MapViewer {
    let mut viewer = MapViewer::new(builtin::college());
    let request = viewer.load_floor(floor).unwrap();
    fetch(&mut viewer, root, request);
    viewer
}

fn ids_with(viewer: &MapViewer, marker: &str) -> Vec<String> {
    let diagram = viewer.diagram().unwrap();
    diagram
        .with_marker(marker)
        .into_iter()
        .filter_map(|i| diagram.element(i)?.id.clone())
        .collect()
}

#[test]
fn test_binding_covers_exactly_catalog_rooms() {
    let root = map_root();
    let mut viewer = MapViewer::new(builtin::college());
    let request = viewer.load_floor(1).unwrap();

    let outcome = fetch(&mut viewer, root.path(), request);
    assert!(matches!(
        outcome,
        LoadOutcome::Bound {
            floor: 1,
            interactive: 4
        }
    ));
    assert_eq!(
        ids_with(&viewer, markers::INTERACTIVE_ROOM),
        ["room-101", "room-102", "stairs-a", "entrance-main"]
    );
    assert_eq!(ids_with(&viewer, "room-type-stairs"), ["stairs-a"]);

    let diagram = viewer.diagram().unwrap();
    let corridor = diagram.element_by_id("corridor").unwrap();
    assert!(corridor.markers().is_empty());
    assert!(corridor.handler(PointerEvent::Click).is_none());
    assert_eq!(
        diagram.element_by_id("room-101").unwrap().tooltip(),
        Some("101 - Кабинет информатики")
    );
    assert_eq!(viewer.floor_title(), "Первый этаж");
}

#[test]
fn test_selection_lifecycle() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);

    viewer.select("room-101");
    viewer.select("room-101");
    assert_eq!(ids_with(&viewer, markers::SELECTED), ["room-101"]);

    viewer.select("room-102");
    assert_eq!(ids_with(&viewer, markers::SELECTED), ["room-102"]);
    let details = viewer.info_panel().details().unwrap();
    assert_eq!(details.heading(), "102 - Кабинет математики");

    viewer.clear();
    assert!(ids_with(&viewer, markers::SELECTED).is_empty());
    assert_eq!(viewer.info_panel(), &InfoPanel::Placeholder);
    assert_eq!(viewer.state().selected_room_id, None);
}

#[test]
fn test_click_on_room_label_selects_room() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);
    let diagram = viewer.diagram().unwrap();

    // Point inside room-101's rectangle; the label itself has no area.
    let hit = diagram.hit_test(50.0, 50.0).unwrap();
    viewer.click(ClickTarget::Element(hit));
    assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-101"));

    let corridor = viewer.diagram().unwrap().hit_test(400.0, 200.0).unwrap();
    viewer.click(ClickTarget::Element(corridor));
    assert_eq!(viewer.state().selected_room_id, None);
}

#[test]
fn test_search_selects_match_and_blank_query_keeps_it() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);

    assert_eq!(viewer.search("информатики"), ["room-101"]);
    assert_eq!(ids_with(&viewer, markers::SEARCH_RESULT), ["room-101"]);
    assert_eq!(viewer.info_panel().details().unwrap().number, "101");

    assert!(viewer.search("").is_empty());
    assert!(ids_with(&viewer, markers::SEARCH_RESULT).is_empty());
    assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-101"));
}

#[test]
fn test_floor_switch_resets_state_before_binding() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);
    viewer.search("кабинет");
    assert_eq!(viewer.state().selected_room_id.as_deref(), Some("room-101"));

    let request = viewer.switch_floor(2).unwrap();
    assert_eq!(viewer.state().selected_room_id, None);
    assert_eq!(viewer.state().search_query, "");
    assert_eq!(viewer.info_panel(), &InfoPanel::Placeholder);
    assert!(matches!(viewer.region(), DiagramRegion::Loading { floor: 2 }));

    fetch(&mut viewer, root.path(), request);
    assert_eq!(viewer.floor_title(), "Второй этаж");
    assert_eq!(
        ids_with(&viewer, markers::INTERACTIVE_ROOM),
        ["room-201", "room-202"]
    );
    assert!(ids_with(&viewer, markers::SELECTED).is_empty());

    // Rooms of the previous floor are no longer selectable.
    assert!(!viewer.select("room-101"));
    assert!(viewer.select("room-201"));
}

#[test]
fn test_failed_fetch_shows_only_failure_message() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);
    viewer.select("room-101");

    let request = viewer.switch_floor(3).unwrap();
    let outcome = fetch(&mut viewer, root.path(), request);

    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert!(outcome.status_message().unwrap().contains("floor 3"));
    match viewer.region() {
        DiagramRegion::Failed { floor, message } => {
            assert_eq!(*floor, 3);
            assert_eq!(message, &failure_message(3));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(viewer.diagram().is_none());
    assert_eq!(viewer.state().selected_room_id, None);
    assert!(!viewer.select("room-301"));

    // A failed floor can be retried from the selector.
    assert!(viewer.switch_floor(3).is_some());
}

/// Answers one HTTP request with `status_line` and `body`. Returns the base
/// URL and a receiver for the request line the server saw.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 512];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let request = String::from_utf8_lossy(&request);
        tx.send(request.lines().next().unwrap_or_default().to_string())
            .unwrap();

        let response = format!(
            "{status_line}\r\nContent-Type: image/svg+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (format!("http://{address}"), rx)
}

#[test]
fn test_http_not_found_fails_floor() {
    let root = map_root();
    let mut viewer = open(root.path(), 1);
    viewer.select("room-101");

    let (base_url, requests) = serve_once("HTTP/1.1 404 Not Found", "");
    let source = HttpSource::new(&base_url, Some(Duration::from_secs(5)));
    let request = viewer.switch_floor(3).unwrap();
    let outcome = viewer.complete_load(request.resolve(&source));

    assert_eq!(
        requests.recv_timeout(Duration::from_secs(5)).unwrap(),
        "GET /maps/floor-3.svg HTTP/1.1"
    );
    assert!(matches!(
        outcome,
        LoadOutcome::Failed(ViewerError::AssetFetchFailed {
            floor: 3,
            source: FetchError::Status { status: 404, .. },
        })
    ));
    assert!(matches!(
        viewer.region(),
        DiagramRegion::Failed { floor: 3, message } if *message == failure_message(3)
    ));
    assert_eq!(viewer.state().selected_room_id, None);
}

#[test]
fn test_http_source_serves_floor() {
    let (base_url, _requests) = serve_once("HTTP/1.1 200 OK", FLOOR_2);
    let source = HttpSource::new(&base_url, Some(Duration::from_secs(5)));
    let mut viewer = MapViewer::new(builtin::college());
    let request = viewer.load_floor(2).unwrap();

    let outcome = viewer.complete_load(request.resolve(&source));
    assert!(matches!(
        outcome,
        LoadOutcome::Bound {
            floor: 2,
            interactive: 2
        }
    ));
}

#[test]
fn test_stale_response_is_discarded() {
    let root = map_root();
    let mut viewer = MapViewer::new(builtin::college());
    let slow = viewer.load_floor(1).unwrap();
    let fast = viewer.switch_floor(2).unwrap();

    fetch(&mut viewer, root.path(), fast);
    let outcome = fetch(&mut viewer, root.path(), slow);

    assert!(matches!(outcome, LoadOutcome::Stale { floor: 1 }));
    assert_eq!(viewer.state().current_floor, 2);
    assert_eq!(
        ids_with(&viewer, markers::INTERACTIVE_ROOM),
        ["room-201", "room-202"]
    );
}

#[test]
fn test_fetch_worker_delivers_response() {
    let root = map_root();
    let worker = FetchWorker::new(Arc::new(FileSource::new(root.path())));
    let mut viewer = MapViewer::new(builtin::college());

    worker.spawn(viewer.load_floor(2).unwrap());
    let response = worker.recv_timeout(Duration::from_secs(5)).unwrap();
    let outcome = viewer.complete_load(response);

    assert!(matches!(
        outcome,
        LoadOutcome::Bound {
            floor: 2,
            interactive: 2
        }
    ));
    assert_eq!(viewer.pending_request(), None);
}

#[test]
fn test_custom_catalog_drives_viewer() {
    let root = map_root();
    let catalog = parse_catalog(
        r#"{
            "1": {
                "name": "Ground",
                "svgFile": "maps/floor-1.svg",
                "rooms": {
                    "corridor": { "number": "C1", "name": "Main hall", "type": "entrance" }
                }
            }
        }"#,
    )
    .unwrap();

    let mut viewer = MapViewer::new(catalog);
    let request = viewer.load_floor(1).unwrap();
    fetch(&mut viewer, root.path(), request);

    assert_eq!(viewer.floor_title(), "Ground");
    assert_eq!(ids_with(&viewer, markers::INTERACTIVE_ROOM), ["corridor"]);
    assert_eq!(viewer.search("hall"), ["corridor"]);
}
