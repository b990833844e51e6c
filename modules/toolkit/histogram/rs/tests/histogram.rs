use eyre::Result;
use itertools::Itertools;

use motiflab_core_rs::loc::{Region, Sequence, Strand};
use motiflab_histogram_rs::{Alignment, Anchor, Binner, Config, Filter, SpanError, Summary};

fn histogram(config: Config, sequences: &[Sequence], bins: usize) -> Result<(Vec<f64>, Summary)> {
    let mut counts = vec![0.0; bins];
    let summary = Binner::builder(config)
        .build()
        .count_regions(sequences, &mut counts, &Filter::new())?;
    Ok((counts, summary))
}

fn onehot(bins: usize, index: usize) -> Vec<f64> {
    (0..bins).map(|x| if x == index { 1.0 } else { 0.0 }).collect()
}

#[test]
fn reverse_strand_mirrors_positions() -> Result<()> {
    let region = Region::new(0, 1)?;
    let forward =
        Sequence::new("fwd", 1_000, 10, Strand::Forward)?.with_regions([region.clone()]);
    let reverse = Sequence::new("rev", 5_000, 10, Strand::Reverse)?.with_regions([region]);
    let config = |anchor| Config::new(Alignment::Upstream, anchor, false);

    let (counts, _) = histogram(config(Anchor::Upstream), &[forward.clone()], 10)?;
    assert_eq!(counts, onehot(10, 0));

    // The region occupies the last two bases in the reverse strand frame
    let (counts, _) = histogram(config(Anchor::Upstream), &[reverse.clone()], 10)?;
    assert_eq!(counts, onehot(10, 8));
    let (counts, _) = histogram(config(Anchor::Downstream), &[reverse.clone()], 10)?;
    assert_eq!(counts, onehot(10, 9));
    let (counts, _) = histogram(config(Anchor::Downstream), &[forward, reverse], 10)?;
    assert_eq!(counts, [0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5]);
    Ok(())
}

#[test]
fn size_based_alignments() -> Result<()> {
    let sequences = [
        Sequence::new("long", 0, 10, Strand::Forward)?.with_regions([Region::new(0, 0)?]),
        Sequence::new("short", 0, 4, Strand::Forward)?.with_regions([Region::new(0, 0)?]),
    ];

    for (alignment, short) in [
        (Alignment::Upstream, 0),
        (Alignment::Downstream, 6),
        (Alignment::Center, 3),
    ] {
        let config = Config::new(alignment, Anchor::Center, false);
        let (counts, summary) = histogram(config, &sequences, 10)?;
        assert_eq!(*summary.span(), 10);

        let mut expected = onehot(10, 0).into_iter().map(|x| x / 2.0).collect_vec();
        expected[short] += 0.5;
        assert_eq!(counts, expected, "{alignment}");
    }
    Ok(())
}

#[test]
fn tss_alignment() -> Result<()> {
    // Both regions sit exactly at the TSS
    let sequences = [
        Sequence::new("first", 100, 10, Strand::Forward)?
            .with_tss(103)
            .with_regions([Region::new(3, 3)?]),
        Sequence::new("second", 200, 10, Strand::Reverse)?
            .with_tss(202)
            .with_regions([Region::new(2, 2)?]),
    ];

    let config = Config::new(Alignment::Tss, Anchor::Upstream, false);
    let (counts, summary) = histogram(config, &sequences, 14)?;
    assert_eq!(*summary.span(), 14);
    assert_eq!(*summary.bin_width(), 1.0);
    assert_eq!(counts, onehot(14, 7));

    // Coarser bins still keep both regions together
    let config = Config::new(Alignment::Tss, Anchor::Span, false);
    let (counts, _) = histogram(config, &sequences, 2)?;
    assert_eq!(counts, [0.0, 1.0]);
    Ok(())
}

#[test]
fn missing_annotation_is_reported() -> Result<()> {
    let sequences = [
        Sequence::new("annotated", 0, 10, Strand::Forward)?
            .with_tes(9)
            .with_regions([Region::new(0, 9)?]),
        Sequence::new("bare", 0, 10, Strand::Forward)?.with_regions([Region::new(0, 9)?]),
    ];
    let binner = Binner::builder(Config::new(Alignment::Tes, Anchor::Span, false)).build();

    let mut counts = vec![0.5; 4];
    let err = binner
        .count_regions(&sequences, &mut counts, &Filter::new())
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<SpanError>(),
        Some(&SpanError::MissingAnnotation {
            sequence: "bare".to_string(),
            alignment: Alignment::Tes,
        })
    );
    assert_eq!(counts, [0.5; 4]);

    // Filtered out sequences don't need annotations
    let filter = Filter::new().with_sequences(["annotated"]);
    binner.count_regions(&sequences, &mut counts, &filter)?;
    assert_eq!(counts, [1.0; 4]);
    Ok(())
}

#[test]
fn flatten_counts_sequences() -> Result<()> {
    let sequences = [
        Sequence::new("A", 0, 10, Strand::Forward)?
            .with_regions([Region::new(0, 2)?, Region::new(1, 3)?]),
        Sequence::new("B", 0, 10, Strand::Forward)?
            .with_regions([Region::new(6, 8)?, Region::new(0, 0)?]),
        Sequence::new("C", 0, 10, Strand::Forward)?,
    ];

    let config = Config::new(Alignment::Upstream, Anchor::Span, true);
    let (counts, summary) = histogram(config, &sequences, 2)?;
    assert_eq!(counts, [1.0, 0.5]);
    assert_eq!((*summary.regions(), *summary.sequences()), (4, 2));

    let config = Config::new(Alignment::Upstream, Anchor::Span, false);
    let (counts, _) = histogram(config, &sequences, 2)?;
    assert_eq!(counts, [0.75, 0.25]);
    Ok(())
}

#[test]
fn thread_pool_gives_same_results() -> Result<()> {
    let sequences = (0..200)
        .map(|i: i64| -> Result<Sequence> {
            let strand = if i % 3 == 0 { Strand::Reverse } else { Strand::Forward };
            let size = 50 + (i * 7) % 40;
            let regions = (0..i % 5)
                .map(|j| Region::new(j * 9 % size, (j * 9 + 5) % size + j * 9 % size))
                .collect::<Result<Vec<_>>>()?;
            Ok(Sequence::new(format!("seq{i}"), i * 100, size, strand)?
                .with_tss(i * 100 + size / 3)
                .with_regions(regions))
        })
        .collect::<Result<Vec<_>>>()?;

    let config = Config::new(Alignment::Tss, Anchor::Span, true);
    let mut expected = vec![0.0f64; 17];
    Binner::builder(config.clone())
        .build()
        .count_regions(&sequences, &mut expected, &Filter::new())?;

    let binner = Binner::builder(config).set_threads(2)?.build();
    let mut counts = vec![0.0f64; 17];
    binner.count_regions(&sequences, &mut counts, &Filter::new())?;
    assert_eq!(counts, expected);
    assert!(counts.iter().all(|x| (0.0..=1.0).contains(x)));
    Ok(())
}
