use derive_more::{Display, Error};

use motiflab_core_rs::loc::AsSequence;

use crate::config::Alignment;

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum SpanError {
    /// A sequence lacks the annotation required by the requested alignment.
    #[display("sequence '{sequence}' has no {alignment} annotation")]
    MissingAnnotation {
        sequence: String,
        alignment: Alignment,
    },
}

/// Shared coordinate system of all sequences taking part in a histogram.
///
/// Every sequence is placed at its own offset so that the alignment origins coincide and all
/// positions of all sequences fall into `[0, span)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Frame {
    alignment: Alignment,
    span: i64,
    // Largest distance from the TSS/TES to the upstream end of a sequence
    max_upstream: i64,
}

impl Frame {
    pub fn new<S: AsSequence>(alignment: Alignment, sequences: &[&S]) -> Result<Self, SpanError> {
        if !alignment.requires_annotation() {
            let span = sequences.iter().map(|x| x.size()).max().unwrap_or(0);
            return Ok(Self {
                alignment,
                span,
                max_upstream: 0,
            });
        }

        let (mut max_upstream, mut max_downstream) = (i64::MIN, i64::MIN);
        for seq in sequences {
            let upstream = Self::distance(alignment, *seq)?;
            max_upstream = max_upstream.max(upstream);
            max_downstream = max_downstream.max(seq.size() - 1 - upstream);
        }

        match sequences.is_empty() {
            true => Ok(Self {
                alignment,
                span: 0,
                max_upstream: 0,
            }),
            false => Ok(Self {
                alignment,
                span: max_upstream + max_downstream + 1,
                max_upstream,
            }),
        }
    }

    pub fn span(&self) -> i64 {
        self.span
    }

    /// Shift that maps positions in the sequence's own frame into the shared frame.
    pub fn offset<S: AsSequence>(&self, seq: &S) -> Result<i64, SpanError> {
        let offset = match self.alignment {
            Alignment::Upstream => 0,
            Alignment::Downstream => self.span - seq.size(),
            Alignment::Center => (self.span - seq.size()) / 2,
            Alignment::Tss | Alignment::Tes => {
                self.max_upstream - Self::distance(self.alignment, seq)?
            }
        };
        Ok(offset)
    }

    // Distance from the upstream end of the sequence to its TSS/TES, in the sequence's own frame.
    // Sites outside of the sequence give negative or oversized distances.
    fn distance<S: AsSequence + ?Sized>(alignment: Alignment, seq: &S) -> Result<i64, SpanError> {
        let site = match alignment {
            Alignment::Tss => seq.tss(),
            Alignment::Tes => seq.tes(),
            // Size-based alignments don't depend on annotations
            Alignment::Upstream | Alignment::Downstream | Alignment::Center => return Ok(0),
        };
        site.map(|site| seq.oriented(site))
            .ok_or_else(|| SpanError::MissingAnnotation {
                sequence: seq.name().to_string(),
                alignment,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motiflab_core_rs::loc::{Sequence, Strand};

    #[test]
    fn test_size_based_frames() -> eyre::Result<()> {
        let short = Sequence::new("short", 100, 4, Strand::Forward)?;
        let long = Sequence::new("long", 500, 10, Strand::Reverse)?;
        let sequences = [&short, &long];

        let frame = Frame::new(Alignment::Upstream, &sequences)?;
        assert_eq!(frame.span(), 10);
        assert_eq!(frame.offset(&short)?, 0);

        let frame = Frame::new(Alignment::Downstream, &sequences)?;
        assert_eq!(frame.offset(&short)?, 6);
        assert_eq!(frame.offset(&long)?, 0);

        let frame = Frame::new(Alignment::Center, &sequences)?;
        assert_eq!(frame.offset(&short)?, 3);

        let empty: [&Sequence; 0] = [];
        assert_eq!(Frame::new(Alignment::Center, &empty)?.span(), 0);
        Ok(())
    }

    #[test]
    fn test_tss_frame() -> eyre::Result<()> {
        // TSS 3 bases into the first sequence, 7 into the second
        let first = Sequence::new("first", 100, 10, Strand::Forward)?.with_tss(103);
        let second = Sequence::new("second", 200, 10, Strand::Reverse)?.with_tss(202);
        assert_eq!(second.oriented(202), 7);

        let frame = Frame::new(Alignment::Tss, &[&first, &second])?;
        assert_eq!(frame.span(), 7 + 6 + 1);
        assert_eq!(frame.offset(&first)?, 4);
        assert_eq!(frame.offset(&second)?, 0);
        Ok(())
    }

    #[test]
    fn test_missing_annotation() -> eyre::Result<()> {
        let annotated = Sequence::new("annotated", 0, 10, Strand::Forward)?.with_tes(5);
        let bare = Sequence::new("bare", 0, 10, Strand::Forward)?;

        let err = Frame::new(Alignment::Tes, &[&annotated, &bare]).unwrap_err();
        assert_eq!(
            err,
            SpanError::MissingAnnotation {
                sequence: "bare".to_string(),
                alignment: Alignment::Tes
            }
        );
        assert_eq!(err.to_string(), "sequence 'bare' has no TES annotation");
        assert!(Frame::new(Alignment::Tss, &[&annotated]).is_err());
        Ok(())
    }
}
