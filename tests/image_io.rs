#![cfg(feature = "image-io")]

use seamcarve::io::{load_rgb_image, save_gray_image, save_rgb_image};
use seamcarve::{gradient_magnitude, CarvingScheme, OwnedImage, RgbWeights, SeamCarver};

#[test]
fn carved_png_round_trips_through_disk() {
    let (width, height) = (12, 9);
    let data = (0..width * height)
        .map(|i| [(i * 7) as u8, (i * 3) as u8, (i * 11) as u8])
        .collect();
    let img = OwnedImage::new(data, width, height).unwrap();
    let carved = SeamCarver::to_size(img.view(), 9, 8, CarvingScheme::Interleaved)
        .unwrap()
        .carve()
        .unwrap();

    let dir = std::env::temp_dir();
    let path = dir.join(format!("seamcarve_roundtrip_{}.png", std::process::id()));
    save_rgb_image(&carved, &path).unwrap();
    let loaded = load_rgb_image(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, carved);
}

#[test]
fn energy_preview_saves_as_grayscale() {
    let data = (0..16).map(|i| [i as u8 * 16, 0, 0]).collect();
    let img = OwnedImage::new(data, 4, 4).unwrap();
    let energy = gradient_magnitude(img.view(), &RgbWeights::default()).unwrap();

    let path = std::env::temp_dir().join(format!("seamcarve_energy_{}.png", std::process::id()));
    save_gray_image(&energy, &path).unwrap();
    let loaded = image::open(&path).unwrap().to_luma8();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.as_raw(), energy.data());
}

#[test]
fn missing_file_reports_io_error() {
    let err = load_rgb_image("/nonexistent/seamcarve/input.png").err().unwrap();
    assert!(matches!(err, seamcarve::SeamCarveError::ImageIo { .. }));
}
