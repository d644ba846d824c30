//! Asset preloading against in-memory and on-disk sources.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use tui_jigsaw::assets::{
    AssetManifest, AssetPreloader, AssetRuntime, CompletionPolicy, FsAssetSource,
    MemoryAssetSource, NoopObserver, PreloadEvent,
};

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[tokio::test]
async fn rejected_image_is_reported_and_the_rest_resolves() {
    let source = MemoryAssetSource::new().with("A", png(4, 2));
    let mut preloader =
        AssetPreloader::new(Arc::new(source), AssetManifest::new().image("A").image("B"));
    assert!(preloader.is_loading());

    let bundle = preloader.run(&mut NoopObserver).await;

    assert!(!preloader.is_loading());
    assert_eq!(preloader.errors(), ["Failed to load image: B".to_string()]);
    assert_eq!(bundle.images.len(), 1);
    assert_eq!(bundle.image("A").map(|i| i.size()), Some((4, 2)));
}

#[test]
fn sounds_fail_independently_of_images() {
    let source = MemoryAssetSource::new()
        .with("A", png(2, 2))
        .with("snap.wav", b"RIFF".to_vec());
    let mut preloader = AssetPreloader::new(
        Arc::new(source),
        AssetManifest::new()
            .image("A")
            .sound("snap", "snap.wav")
            .sound("win", "win.wav"),
    )
    .with_policy(CompletionPolicy::Tolerant);

    let bundle = tokio_test::block_on(preloader.run(&mut NoopObserver));
    assert!(bundle.sound("snap").is_some());
    assert!(bundle.sound("win").is_none());
    assert_eq!(preloader.errors(), ["Failed to load audio: win".to_string()]);
    assert_eq!(preloader.progress().overall(), 100.0);
}

#[test]
fn runtime_loads_from_disk_and_settles() {
    let dir = std::env::temp_dir().join(format!("tui-jigsaw-preload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("cat.png"), png(6, 6)).unwrap();

    let source = FsAssetSource::with_root(dir.clone());
    let preloader = AssetPreloader::new(
        Arc::new(source),
        AssetManifest::new().image("cat.png").image("missing.png"),
    );
    let mut runtime = AssetRuntime::start(preloader).unwrap();

    let mut report = None;
    let mut failed = Vec::new();
    for _ in 0..500 {
        match runtime.try_recv() {
            Some(PreloadEvent::Settled(r)) => {
                report = Some(r);
                break;
            }
            Some(PreloadEvent::Failed(message)) => failed.push(message),
            Some(PreloadEvent::Progress(_)) => {}
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }
    runtime.shutdown();
    let _ = std::fs::remove_dir_all(&dir);

    let report = report.expect("preload settled");
    assert!(report.bundle.image("cat.png").is_some());
    assert_eq!(report.errors, vec!["Failed to load image: missing.png".to_string()]);
    assert_eq!(failed, report.errors);
}
