use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eyre::{ensure, eyre, Result};
use rayon::ThreadPoolBuilder;

use mutperiod_core_rs::loc::{PerStrand, Position};
use mutperiod_dyadcount_rs::{count_files, Config, Counts, Engine, Parity};
use mutperiod_io_rs::{mutation, nucleosome, ReadRecord};

const THREADS: usize = 4;

pub fn get_resource_path(resource: impl AsRef<Path>) -> Result<PathBuf> {
    let resource = resource.as_ref();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|x| x.join("resources"))
        .map(|x| x.join(resource))
        .ok_or_else(|| {
            eyre!(
                "Failed to locate requested resource: {}",
                resource.display()
            )
        })?;
    ensure!(
        path.exists(),
        "Requested resource does not exist: {}",
        path.display()
    );
    Ok(path)
}

// Quadratic reference: test every mutation against every dyad on the same chromosome
fn brute_force(config: &Config) -> Result<BTreeMap<Position, PerStrand<u64>>> {
    let mut mutations = Vec::new();
    mutation::Reader::from_path(get_resource_path("mutations.bed")?)?.read_to_end(&mut mutations)?;
    let mut nucleosomes = Vec::new();
    nucleosome::Reader::from_path(get_resource_path("nucleosomes.bed")?)?
        .read_to_end(&mut nucleosomes)?;

    let reach = config.reach();
    let mut expected: BTreeMap<Position, PerStrand<u64>> = BTreeMap::new();
    for nuc in &nucleosomes {
        for mutation in mutations.iter().filter(|x| x.chromosome() == nuc.chromosome()) {
            let offset = *mutation.position() - *nuc.dyad();
            if -reach <= offset && offset <= reach {
                *expected.entry(offset).or_default().get_mut(*mutation.strand()) += 1;
            }
        }
    }
    Ok(expected)
}

fn verify(counts: &Counts, expected: &BTreeMap<Position, PerStrand<u64>>) -> Result<()> {
    for row in counts.rows() {
        let cnts = expected.get(row.offset()).copied().unwrap_or_default();
        ensure!(
            (*row.plus(), *row.minus()) == (cnts.plus, cnts.minus),
            "Mismatch at offset {}: {:?} vs expected {:?}",
            row.offset(),
            row,
            cnts
        );
    }
    ensure!(
        counts.total() == expected.values().map(|x| x.total()).sum::<u64>(),
        "Total number of credited mutations differs from the expected one"
    );
    Ok(())
}

#[test]
fn regression() -> Result<()> {
    for config in [
        Config::nucleosome(Parity::Odd),
        Config::nucleosome_with_linker(Parity::Odd),
        Config::nucleosome_group(Parity::Odd),
    ] {
        let expected = brute_force(&config)?;
        ensure!(!expected.is_empty(), "Resources don't overlap any dyad");

        let mut engine = Engine::builder()
            .set_thread_pool(ThreadPoolBuilder::new().num_threads(THREADS).build()?)
            .build(config);

        for (mutations, nucleosomes) in [
            ("mutations.bed", "nucleosomes.bed"),
            ("mutations.bed.gz", "nucleosomes.bed.gz"),
            ("mutations.bed.gz", "nucleosomes.bed"),
        ] {
            let mutations = get_resource_path(mutations)?;
            let nucleosomes = get_resource_path(nucleosomes)?;

            let sequential = count_files(&mutations, &nucleosomes, &config)?;
            verify(&sequential, &expected)?;

            // The engine is reused between runs
            let parallel = engine.run(&mutations, &nucleosomes)?;
            verify(&parallel, &expected)?;
            assert_eq!(sequential.accumulator(), parallel.accumulator());

            let chromosomes = parallel
                .summaries()
                .iter()
                .map(|x| x.chromosome().as_str())
                .collect::<Vec<_>>();
            assert_eq!(chromosomes, ["chr1", "chr10", "chr2", "chrX"]);
        }
    }
    Ok(())
}

#[test]
fn written_table_matches_counts() -> Result<()> {
    let config = Config::nucleosome(Parity::Odd);
    let counts = count_files(
        get_resource_path("mutations.bed.gz")?,
        get_resource_path("nucleosomes.bed.gz")?,
        &config,
    )?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("counts.tsv");
    counts.write(&path)?;

    let written = std::fs::read_to_string(&path)?;
    let mut lines = written.lines();
    assert_eq!(lines.next().map(|x| x.split('\t').count()), Some(5));

    let mut total = 0;
    for (line, row) in lines.zip(counts.rows()) {
        let fields = line.split('\t').collect::<Vec<_>>();
        assert_eq!(fields[0], row.offset().to_string());
        assert_eq!(fields[3].parse::<u64>()?, row.plus() + row.minus());
        total += fields[3].parse::<u64>()?;
    }
    assert_eq!(total, counts.total());
    assert_eq!(written.lines().count(), 2 * 73 + 2);
    Ok(())
}
