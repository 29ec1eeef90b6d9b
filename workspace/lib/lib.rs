//! Shared plumbing for the driver binaries: logging setup and plain CSV
//! output.

use std::{
    fs::{ self, File },
    io::{ BufWriter, Write },
    path::{ Path, PathBuf },
};
use anyhow::{ Context, Result };
use ndarray as nd;
use num_complex::Complex64 as C64;
use nlse::{ diagnostics::Trace, utils::fft_shift };

/// Initialize `env_logger`, defaulting to the `info` level if `RUST_LOG` is
/// unset.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"))
        .init();
}

/// Create (if necessary) and return the output directory.
pub fn outdir() -> Result<PathBuf> {
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)
        .with_context(|| format!("couldn't create {}", outdir.display()))?;
    Ok(outdir)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("couldn't create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write equal-length columns of numbers under a single header row.
pub fn write_columns(path: &Path, header: &[&str], columns: &[&[f64]])
    -> Result<()>
{
    let rows = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut writer = create(path)?;
    writeln!(writer, "{}", header.join(","))?;
    for i in 0..rows {
        let row: Vec<String> = columns.iter().map(|c| c[i].to_string()).collect();
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    log::info!("wrote {} rows to {}", rows, path.display());
    Ok(())
}

/// Write a 1D field alongside its coordinates as `x,re,im,abs`.
pub fn write_field_1d(path: &Path, x: &nd::Array1<f64>, psi: &nd::Array1<C64>)
    -> Result<()>
{
    let x: Vec<f64> = x.to_vec();
    let re: Vec<f64> = psi.iter().map(|z| z.re).collect();
    let im: Vec<f64> = psi.iter().map(|z| z.im).collect();
    let abs: Vec<f64> = psi.iter().map(|z| z.norm()).collect();
    write_columns(
        path,
        &["x", "re", "im", "abs"],
        &[&x, &re, &im, &abs],
    )
}

/// Write the magnitude of a 2D field as a matrix, one row per `x` node.
pub fn write_field_2d(path: &Path, psi: &nd::Array2<C64>) -> Result<()> {
    let mut writer = create(path)?;
    for row in psi.outer_iter() {
        let line: Vec<String> = row.iter().map(|z| z.norm().to_string()).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    writer.flush()?;
    log::info!("wrote {:?} field to {}", psi.dim(), path.display());
    Ok(())
}

/// Write a peak-magnitude trace as `step,t,peak`.
pub fn write_trace(path: &Path, trace: &Trace) -> Result<()> {
    let steps: Vec<f64> = trace.steps().iter().map(|&s| s as f64).collect();
    write_columns(path, &["step", "t", "peak"], &[&steps, trace.times(), trace.peaks()])
}

/// Write the power spectrum `|F[ψ](k)|²` of a 1D field, ordered by increasing
/// wavenumber, as `k,power`.
pub fn write_spectrum_1d(path: &Path, dx: f64, psi: &nd::Array1<C64>)
    -> Result<()>
{
    let mut psik = psi.clone();
    let fft = nlse::transform::Transform::new(psik.raw_dim())?;
    fft.forward(&mut psik)?;
    let k = fft_shift(&nlse::utils::wavenumbers(psi.len(), dx));
    let power = fft_shift(&psik.mapv(|z| z.norm_sqr()));
    write_columns(
        path,
        &["k", "power"],
        &[&k.to_vec(), &power.to_vec()],
    )
}
