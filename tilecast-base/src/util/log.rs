/// Provides the recommended log filter for programs which want to exclude particularly noisy
/// details of tilecast's dependencies.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every ray or every pixel unless something is wrong.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with("png::") // logs chunk details while encoding
        || target.starts_with("rayon")
        || target.starts_with("rayon_core::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter() {
        assert!(!standard_filter(
            &log::Metadata::builder().target("png::encoder").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("tilecast::raycast").build()
        ));
        assert!(standard_filter(
            &log::Metadata::builder().target("some_random_crate").build()
        ));
    }
}
