use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};

use morpha::imgproc::{extrema, morphology::Footprint, render};
use morpha::tensor::Tensor;

#[derive(FromArgs)]
/// Detect regional maxima and minima of a synthetic image and log them to Rerun
struct Args {
    /// side length of the synthetic image (default: 128)
    #[argh(option, short = 's', default = "128")]
    size: usize,

    /// number of gaussian bumps in the image (default: 12)
    #[argh(option, short = 'p', default = "12")]
    peaks: usize,

    /// neighborhood connectivity, 1 or 2 (default: 2)
    #[argh(option, short = 'c', default = "2")]
    connectivity: usize,

    /// display scale factor (default: 4.0)
    #[argh(option, default = "4.0")]
    scale: f32,

    /// random seed (default: 42)
    #[argh(option, default = "42")]
    seed: u64,
}

/// Sum of randomly placed positive and negative gaussian bumps.
fn synthetic_image(size: usize, peaks: usize, seed: u64) -> Tensor<f32, 2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bumps: Vec<(f32, f32, f32, f32)> = (0..peaks)
        .map(|_| {
            let cy = rng.random_range(0.0..size as f32);
            let cx = rng.random_range(0.0..size as f32);
            let sigma = rng.random_range(2.0..size as f32 / 6.0 + 3.0);
            let amplitude = rng.random_range(-1.0..1.0);
            (cy, cx, sigma, amplitude)
        })
        .collect();

    Tensor::from_shape_fn([size, size], |[r, c]| {
        bumps
            .iter()
            .map(|&(cy, cx, sigma, amplitude)| {
                let d2 = (r as f32 - cy).powi(2) + (c as f32 - cx).powi(2);
                amplitude * (-d2 / (2.0 * sigma * sigma)).exp()
            })
            .sum::<f32>()
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.size == 0 {
        return Err("image size must be positive".into());
    }

    let image = synthetic_image(args.size, args.peaks, args.seed);
    let footprint = Footprint::<2>::connectivity(args.connectivity);

    let maxima = extrema::find_regional_maxima(&image, &footprint)?;
    let minima = extrema::find_regional_minima(&image, &footprint)?;

    log::info!(
        "found {} regional maxima and {} regional minima in a {}x{} image",
        extrema::count_marked(&maxima),
        extrema::count_marked(&minima),
        args.size,
        args.size
    );

    // create a Rerun recording stream
    let rec = rerun::RecordingStreamBuilder::new("morpha regional extrema").spawn()?;

    for (name, buffer) in [
        ("image", render::render_grayscale(&image, args.scale)?),
        ("maxima", render::render_grayscale(&maxima, args.scale)?),
        ("minima", render::render_grayscale(&minima, args.scale)?),
    ] {
        let [rows, cols] = buffer.shape;
        rec.log(
            name,
            &rerun::Image::from_elements(
                buffer.as_slice(),
                [cols as u32, rows as u32],
                rerun::ColorModel::L,
            ),
        )?;
    }

    Ok(())
}
