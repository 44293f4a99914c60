use crate::error::IntakeRejection;
use crate::file::UploadFile;
use crate::mode::{FileClass, UploadMode};

/// Files from one drop, sorted into their roles.
#[derive(Debug, Clone)]
pub struct IntakeResult<F> {
    pub csv: Option<F>,
    pub pdf: Option<F>,
    pub image: Option<F>,
    pub rejections: Vec<IntakeRejection>,
}

impl<F> Default for IntakeResult<F> {
    fn default() -> Self {
        Self {
            csv: None,
            pdf: None,
            image: None,
            rejections: Vec::new(),
        }
    }
}

impl<F> IntakeResult<F> {
    pub fn accepted_count(&self) -> usize {
        [self.csv.is_some(), self.pdf.is_some(), self.image.is_some()]
            .into_iter()
            .filter(|assigned| *assigned)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted_count() == 0 && self.rejections.is_empty()
    }

    fn slot(&mut self, class: FileClass) -> &mut Option<F> {
        match class {
            FileClass::Csv => &mut self.csv,
            FileClass::Pdf => &mut self.pdf,
            FileClass::Image => &mut self.image,
        }
    }
}

/// Classifies a batch of files for `mode`.
///
/// The first file of each class wins; later ones are reported as conflicts.
/// Files outside the mode's accept-set are reported, even if the drop zone
/// already filtered them, since declared types can be spoofed.
pub fn accept_drop<F: UploadFile>(files: Vec<F>, mode: UploadMode) -> IntakeResult<F> {
    let mut result = IntakeResult::default();

    for file in files {
        let media_type = file.media_type();
        let class = match FileClass::of(&media_type) {
            Some(class) if mode.accepted_classes().contains(&class) => class,
            _ => {
                log::warn!("Rejected {} ({}) in {} mode", file.name(), media_type, mode);
                result.rejections.push(IntakeRejection::UnsupportedType {
                    file_name: file.name(),
                    media_type,
                    mode,
                });
                continue;
            }
        };

        let slot = result.slot(class);
        if slot.is_some() {
            log::warn!("Ignoring duplicate {} file {}", class, file.name());
            result.rejections.push(IntakeRejection::Duplicate {
                file_name: file.name(),
                class,
            });
        } else {
            log::debug!("Classified {} as {}", file.name(), class);
            *slot = Some(file);
        }
    }

    result
}
