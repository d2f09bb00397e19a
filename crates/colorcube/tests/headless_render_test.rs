//! Headless rendering integration tests.
//!
//! These tests need a GPU adapter (real or software fallback). Without one
//! engine creation fails and the tests return early.

use colorcube_rs::*;

fn render_or_skip(options: &Options, width: u32, height: u32) -> Option<Vec<u8>> {
    match render_to_image(options, width, height) {
        Ok(pixels) => Some(pixels),
        Err(e) if e.kind() == ErrorKind::Render => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            None
        }
        Err(e) => panic!("headless render failed: {e}"),
    }
}

#[test]
fn headless_identity_cube() {
    let options = Options {
        cube_size: 8,
        background_color: Vec3::new(0.2, 0.4, 0.6),
        ..Options::default()
    };
    let Some(pixels) = render_or_skip(&options, 128, 96) else {
        return;
    };
    assert_eq!(pixels.len(), 128 * 96 * 4);

    let first = &pixels[0..4];
    let all_uniform = pixels.chunks(4).all(|px| px == first);
    assert!(!all_uniform, "lattice should be visible against the background");

    // The corner is outside the lattice's silhouette.
    let close = |a: u8, b: u8| a.abs_diff(b) <= 1;
    assert!(close(first[0], 51) && close(first[1], 102) && close(first[2], 153));
    assert_eq!(first[3], 255);
}

#[test]
fn headless_render_to_file() {
    let dir = std::env::temp_dir().join(format!("colorcube-headless-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cube.png");
    let options = Options {
        cube_size: 4,
        ..Options::default()
    };

    match render_to_file(&options, &path, 64, 64) {
        Ok(()) => {
            let image = image::open(&path).unwrap();
            assert_eq!((image.width(), image.height()), (64, 64));
        }
        Err(e) if e.kind() == ErrorKind::Render => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
        }
        Err(e) => panic!("headless render failed: {e}"),
    }

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn headless_rejects_bad_options_before_gpu() {
    let options = Options {
        cube_size: 0,
        ..Options::default()
    };
    let err = render_to_image(&options, 32, 32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
