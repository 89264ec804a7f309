use thiserror::Error;

/// Number of comparison videos in the deployed questionnaire.
pub const STIMULUS_COUNT: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StimulusError {
    #[error("stimulus list is empty")]
    Empty,

    #[error("stimulus locator at position {index} is blank")]
    BlankLocator { index: usize },
}

/// One fixed video-comparison unit shown to the respondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stimulus {
    index: usize,
    locator: String,
}

impl Stimulus {
    /// Zero-based position in the questionnaire.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Resource locator of the video, relative to the asset store.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Human label, e.g. `Question 3`.
    #[must_use]
    pub fn label(&self) -> String {
        question_label(self.index)
    }
}

/// Ordered, immutable list of stimuli for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimulusSet {
    items: Vec<Stimulus>,
}

impl StimulusSet {
    /// Build a stimulus set from video locators, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `StimulusError::Empty` when no locators are given and
    /// `StimulusError::BlankLocator` when any locator is blank.
    pub fn new<I, S>(locators: I) -> Result<Self, StimulusError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items = Vec::new();
        for (index, locator) in locators.into_iter().enumerate() {
            let locator = locator.into();
            if locator.trim().is_empty() {
                return Err(StimulusError::BlankLocator { index });
            }
            items.push(Stimulus { index, locator });
        }
        if items.is_empty() {
            return Err(StimulusError::Empty);
        }
        Ok(Self { items })
    }

    /// The ten colonoscopy comparison clips used by the study.
    #[must_use]
    pub fn colonoscopy_default() -> Self {
        let items = (0..STIMULUS_COUNT)
            .map(|index| Stimulus {
                index,
                locator: format!("VideoColonoscopy{}.mp4", index + 3),
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stimulus> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stimulus> {
        self.items.iter()
    }
}

/// 1-based question label for a zero-based index.
#[must_use]
pub fn question_label(index: usize) -> String {
    format!("Question {}", index + 1)
}
