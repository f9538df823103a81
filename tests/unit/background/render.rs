use std::path::PathBuf;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_background").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn wide_images_keep_height_and_crop_horizontally() {
    let crop = cover_crop(2000, 1000, Canvas::default());
    assert_eq!(
        crop,
        CoverCrop {
            left: 718,
            top: 0,
            width: 563,
            height: 1000,
        }
    );
}

#[test]
fn tall_images_keep_width_and_crop_vertically() {
    let crop = cover_crop(1000, 4000, Canvas::default());
    assert_eq!(
        crop,
        CoverCrop {
            left: 0,
            top: 1111,
            width: 1000,
            height: 1778,
        }
    );
}

#[test]
fn matching_ratio_uses_the_whole_image() {
    let crop = cover_crop(540, 960, Canvas::default());
    assert_eq!(
        crop,
        CoverCrop {
            left: 0,
            top: 0,
            width: 540,
            height: 960,
        }
    );
}

#[test]
fn extreme_aspect_ratios_stay_inside_the_source() {
    let tall = cover_crop(1, 20000, Canvas::default());
    assert_eq!((tall.width, tall.height), (1, 2));
    assert_eq!(tall.top, 9999);

    let wide = cover_crop(20000, 1, Canvas::default());
    assert_eq!((wide.width, wide.height), (1, 1));
    assert!(wide.left + wide.width <= 20000);
}

#[test]
fn solid_fills_every_pixel() {
    let canvas = Canvas::new(30, 40, 5).unwrap();
    let img = solid(canvas, Rgb8::new(45, 52, 54));
    assert_eq!(img.dimensions(), (30, 40));
    assert!(img.pixels().all(|p| p.0 == [45, 52, 54, 255]));
}

#[test]
fn image_background_is_resized_to_canvas() {
    let dir = scratch_dir("resize");
    let path = dir.join("wide.png");
    let src = image::RgbImage::from_fn(200, 100, |x, _| {
        if x < 100 {
            image::Rgb([0, 0, 0])
        } else {
            image::Rgb([255, 255, 255])
        }
    });
    src.save(&path).unwrap();

    let canvas = Canvas::new(90, 160, 10).unwrap();
    let bg = render_background(canvas, &BackgroundSpec::image("wide.png"), &dir, Rgb8::WHITE);
    assert!(bg.is_image);
    assert_eq!(bg.pixels.dimensions(), (90, 160));
    assert!(bg.pixels.pixels().all(|p| p.0[3] == 255));
    // Left edge of the crop is inside the black half, right edge inside the white half.
    assert!(bg.pixels.get_pixel(0, 80).0[0] < 64);
    assert!(bg.pixels.get_pixel(89, 80).0[0] > 192);
}

#[test]
fn sliver_image_is_fitted_without_blowing_up() {
    let dir = scratch_dir("sliver");
    let src = image::RgbImage::from_fn(1, 20000, |_, y| {
        if y < 10000 {
            image::Rgb([200, 10, 10])
        } else {
            image::Rgb([10, 10, 200])
        }
    });
    src.save(dir.join("sliver.png")).unwrap();

    let canvas = Canvas::new(90, 160, 10).unwrap();
    let bg = render_background(canvas, &BackgroundSpec::image("sliver.png"), &dir, Rgb8::WHITE);
    assert!(bg.is_image);
    assert_eq!(bg.pixels.dimensions(), (90, 160));
    assert!(bg.pixels.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn missing_image_falls_back_to_solid() {
    let canvas = Canvas::new(20, 20, 2).unwrap();
    let bg = render_background(
        canvas,
        &BackgroundSpec::image("nonexistent.jpg"),
        Path::new("."),
        Rgb8::WHITE,
    );
    assert!(!bg.is_image);
    assert!(bg.pixels.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn undecodable_image_falls_back_to_solid() {
    let dir = scratch_dir("corrupt");
    std::fs::write(dir.join("bad.png"), b"not a png").unwrap();

    let canvas = Canvas::new(20, 20, 2).unwrap();
    let bg = render_background(
        canvas,
        &BackgroundSpec::image("bad.png"),
        &dir,
        Rgb8::new(10, 20, 30),
    );
    assert!(!bg.is_image);
    assert_eq!(bg.pixels.get_pixel(5, 5).0, [10, 20, 30, 255]);
}

#[test]
fn spec_json_shape() {
    let spec: BackgroundSpec = serde_json::from_str(r#"{"kind":"solid","color":[1,2,3]}"#).unwrap();
    assert_eq!(spec, BackgroundSpec::solid(Rgb8::new(1, 2, 3)));
    let spec: BackgroundSpec = serde_json::from_str(r#"{"kind":"image","path":"bg.jpg"}"#).unwrap();
    assert_eq!(spec, BackgroundSpec::image("bg.jpg"));
}
