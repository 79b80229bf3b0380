//! Random image subsets.

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

use crate::error::CocoEditError;
use crate::model::{CategoryId, Dataset, ImageId};

/// Sampling options.
#[derive(Clone, Debug, Default)]
pub struct SampleOptions {
    /// Number of images to keep.
    pub n: usize,
    /// Seed for a reproducible draw; `None` uses the thread RNG.
    pub seed: Option<u64>,
    /// Also drop categories no sampled annotation refers to.
    pub correct_category: bool,
}

/// Samples a dataset according to `opts`.
pub fn sample_dataset(dataset: &Dataset, opts: &SampleOptions) -> Result<Dataset, CocoEditError> {
    match opts.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            sample_dataset_with_rng(dataset, opts.n, opts.correct_category, &mut rng)
        }
        None => {
            let mut rng = rand::rng();
            sample_dataset_with_rng(dataset, opts.n, opts.correct_category, &mut rng)
        }
    }
}

/// Keeps `n` images drawn without replacement and the annotations on them.
///
/// Images keep their original relative order. Categories are left alone
/// unless `correct_category` is set, in which case only those referenced by
/// a surviving annotation remain. `info` and `licenses` are copied as-is.
///
/// # Errors
/// [`CocoEditError::InvalidArgument`] if `n` exceeds the number of images.
pub fn sample_dataset_with_rng<R: Rng + ?Sized>(
    dataset: &Dataset,
    n: usize,
    correct_category: bool,
    rng: &mut R,
) -> Result<Dataset, CocoEditError> {
    let picked = select_image_indices(dataset.images.len(), n, rng)?;

    let images: Vec<_> = picked.iter().map(|&i| dataset.images[i].clone()).collect();
    let keep: HashSet<ImageId> = images.iter().map(|image| image.id).collect();

    let annotations: Vec<_> = dataset
        .annotations
        .iter()
        .filter(|ann| keep.contains(&ann.image_id))
        .cloned()
        .collect();

    let categories = if correct_category {
        let used: HashSet<CategoryId> = annotations.iter().map(|ann| ann.category_id).collect();
        dataset
            .categories
            .iter()
            .filter(|cat| used.contains(&cat.id))
            .cloned()
            .collect()
    } else {
        dataset.categories.clone()
    };

    Ok(Dataset {
        info: dataset.info.clone(),
        licenses: dataset.licenses.clone(),
        images,
        categories,
        annotations,
    })
}

/// Picks `k` distinct positions out of `0..total`, returned in ascending
/// order.
pub fn select_image_indices<R: Rng + ?Sized>(
    total: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, CocoEditError> {
    if k > total {
        return Err(CocoEditError::InvalidArgument(format!(
            "cannot sample {k} images from a dataset with {total}"
        )));
    }

    let mut indices: Vec<usize> = (0..total).collect();
    indices.shuffle(rng);
    indices.truncate(k);
    indices.sort_unstable();
    Ok(indices)
}
