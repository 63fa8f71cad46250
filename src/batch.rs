use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::anim::compositor::composite_all;
use crate::anim::frame::AnimationFrameSource;
use crate::anim::gif_source::GifFrameSource;
use crate::codec::still::{OutputFormat, read_image};
use crate::config::SliceJob;
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::output::sink::{DirectorySink, FrameSink};
use crate::slice::slicer::{SliceAdvisory, slice_sheet};

/// File extensions (lowercase) picked up when a directory is given as input.
pub const SHEET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];

/// Outcome of slicing one sheet file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SheetReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub frames_written: usize,
    /// Set when the sheet produced no frames.
    pub advisory: Option<SliceAdvisory>,
}

/// Per-item result of a batch run. One failing item never affects the others.
#[derive(Debug)]
pub struct BatchItem {
    pub input: PathBuf,
    pub result: FramecutResult<SheetReport>,
}

/// Outcome of resolving one animation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AnimationReport {
    pub frames_written: usize,
    pub canvas: (u32, u32),
    pub total_duration_ms: u64,
}

/// A single file stays as is; a directory expands to its image files in sorted order.
pub fn collect_inputs(path: &Path) -> FramecutResult<Vec<PathBuf>> {
    if !path.exists() {
        return Err(FramecutError::configuration(format!(
            "input path '{}' does not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut out = Vec::new();
    let entries =
        std::fs::read_dir(path).with_context(|| format!("read dir '{}'", path.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in '{}'", path.display()))?;
        let p = entry.path();
        if p.is_file() && has_sheet_extension(&p) {
            out.push(p);
        }
    }
    out.sort();
    Ok(out)
}

fn has_sheet_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SHEET_EXTENSIONS.contains(&e.as_str()))
}

/// Slice one sheet file and write its frames under `out_base` (or next to the input).
#[tracing::instrument(skip_all, fields(input = %path.display()))]
pub fn slice_sheet_file(
    path: &Path,
    job: &SliceJob,
    out_base: Option<&Path>,
) -> FramecutResult<SheetReport> {
    job.validate()?;
    let mut sink = sheet_sink(path, job, out_base)?;

    let sheet = read_image(path)?;
    let out = slice_sheet(&sheet, &job.params(), job.finish())?;
    for (idx, frame) in out.frames.iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    let frames_written = sink.end()?;

    if let Some(advisory) = out.advisory {
        tracing::warn!(%advisory, "no frames extracted");
    } else {
        tracing::info!(frames_written, dir = %sink.dir().display(), "saved frames");
    }
    Ok(SheetReport {
        input: path.to_path_buf(),
        output_dir: sink.dir().to_path_buf(),
        frames_written,
        advisory: out.advisory,
    })
}

fn sheet_sink(
    path: &Path,
    job: &SliceJob,
    out_base: Option<&Path>,
) -> FramecutResult<DirectorySink> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            FramecutError::configuration(format!("input '{}' has no file stem", path.display()))
        })?;
    let base = match out_base {
        Some(b) => b.to_path_buf(),
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    Ok(DirectorySink::sprite_frames(&base, stem, job.format, job.quality))
}

/// Slice many sheets in parallel, one independent job per input.
///
/// Configuration is checked once up front; after that each item succeeds or fails on its own.
/// Inputs whose frames would land in the same output directory (e.g. `Walk.png` and
/// `walk.webp`) all fail with a configuration error and write nothing.
pub fn slice_batch(
    inputs: &[PathBuf],
    job: &SliceJob,
    out_base: Option<&Path>,
    threads: Option<usize>,
) -> FramecutResult<Vec<BatchItem>> {
    job.validate()?;
    let pool = build_thread_pool(threads)?;

    let mut claims: HashMap<PathBuf, usize> = HashMap::new();
    let dirs: Vec<Option<PathBuf>> = inputs
        .iter()
        .map(|input| sheet_sink(input, job, out_base).ok().map(|s| s.dir().to_path_buf()))
        .collect();
    for dir in dirs.iter().flatten() {
        *claims.entry(dir.clone()).or_default() += 1;
    }

    let items = pool.install(|| {
        inputs
            .par_iter()
            .zip(dirs.par_iter())
            .map(|(input, dir)| {
                let result = match dir {
                    Some(dir) if claims.get(dir).is_some_and(|&n| n > 1) => {
                        Err(FramecutError::configuration(format!(
                            "output dir '{}' is shared with another input",
                            dir.display()
                        )))
                    }
                    _ => slice_sheet_file(input, job, out_base),
                };
                BatchItem {
                    input: input.clone(),
                    result,
                }
            })
            .collect::<Vec<_>>()
    });
    Ok(items)
}

/// Composite every frame of `source` and hand the resolved frames to `sink`.
///
/// The whole animation is resolved before the first frame reaches the sink, so a corrupt
/// container writes nothing.
#[tracing::instrument(skip_all)]
pub fn resolve_animation<S, K>(source: S, sink: &mut K) -> FramecutResult<AnimationReport>
where
    S: AnimationFrameSource,
    K: FrameSink,
{
    let canvas = source.canvas_size();
    let frames = composite_all(source)?;
    let mut total_duration_ms = 0u64;
    for frame in &frames {
        total_duration_ms += u64::from(frame.duration_ms);
        sink.push_frame(frame.index as usize, &frame.buffer)?;
    }
    let frames_written = sink.end()?;
    tracing::info!(frames_written, ?canvas, "resolved animation");
    Ok(AnimationReport {
        frames_written,
        canvas,
        total_duration_ms,
    })
}

/// Extract every composited frame of a GIF file into `out_dir` as `frame_<iiii>.<ext>`.
pub fn extract_gif_frames(
    path: &Path,
    out_dir: &Path,
    format: OutputFormat,
    quality: u8,
) -> FramecutResult<AnimationReport> {
    if !(1..=100).contains(&quality) {
        return Err(FramecutError::configuration(format!(
            "quality must be in 1..=100, got {quality}"
        )));
    }
    let source = GifFrameSource::open(path)?;
    let mut sink = DirectorySink::animation_frames(out_dir, format, quality);
    resolve_animation(source, &mut sink)
}

fn build_thread_pool(threads: Option<usize>) -> FramecutResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramecutError::configuration(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        FramecutError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
