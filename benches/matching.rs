use criterion::{criterion_group, criterion_main, Criterion};
use rukuli::{ImageView, Matcher, Template};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

fn bench_find(c: &mut Criterion) {
    let img_width = 640;
    let img_height = 480;
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();

    let tpl_width = 48;
    let tpl_height = 48;
    let tpl_data = extract_patch(&image, img_width, 200, 160, tpl_width, tpl_height);
    let template = Template::new(tpl_data, tpl_width, tpl_height).unwrap();
    let matcher = Matcher::new(&template).unwrap();

    c.bench_function("find_48x48_in_640x480", |b| {
        b.iter(|| {
            let outcome = matcher.find(black_box(image_view)).unwrap();
            black_box(outcome)
        })
    });

    let flat = Template::new(vec![128u8; tpl_width * tpl_height], tpl_width, tpl_height).unwrap();
    let flat_matcher = Matcher::new(&flat).unwrap();
    c.bench_function("find_flat_48x48_in_640x480", |b| {
        b.iter(|| {
            let outcome = flat_matcher.find(black_box(image_view)).unwrap();
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_find);
criterion_main!(benches);
