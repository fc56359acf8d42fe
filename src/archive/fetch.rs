use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};
use tokio::io::AsyncWriteExt;
use tokio_stream::StreamExt;

use crate::archive::listing::list_remote_files;
use crate::constants::{
    BIDR_PRODUCT_LETTERS, PDS_CASSINI_BASE_URL, RESOLUTION_TYPES, RESULTS_DIR,
};
use crate::env_state::TidarEnv;
use crate::identifiers::{
    available_flybys, designator_to_observation_number, most_recent_archive_id,
    observations_without_bidr, pad_observation_number, segment_options,
};
use crate::reference_tables::TableSource;
use crate::tidar_errors::TidarError;
use crate::validation::check_resolution_selection;

/// Selection of what to fetch for one flyby.
///
/// Exactly one of `flyby_id`/`observation_number` must be given; `segment` is required.
/// `resolution` and `top_x_resolutions` are mutually exclusive — when neither is given the
/// highest resolution (`'I'`, 256 pixels/degree) is fetched.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub flyby_id: Option<String>,
    pub observation_number: Option<String>,
    pub segment: Option<String>,
    pub resolution: Option<char>,
    pub top_x_resolutions: Option<usize>,
    pub additional_data_types: Vec<String>,
}

/// Python-style capitalize: first character upper-cased, the rest lower-cased
/// (`"t65"` → `"T65"`, `"tA"` → `"Ta"`).
fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Whether a BIDR file name matches the requested segment and one of the requested resolution
/// letters, over any of the archive's product letters (`BI<LETTER>Q<RESOLUTION>`).
fn bidr_matches(filename: &str, segment: &str, resolutions: &[char]) -> bool {
    if !filename.starts_with("BI") || !filename.contains(segment) {
        return false;
    }
    resolutions.iter().any(|&resolution| {
        BIDR_PRODUCT_LETTERS
            .iter()
            .any(|&letter| filename.contains(&format!("BI{letter}Q{resolution}")))
    })
}

/// The resolution letters selected by the options: the top N of the ordered catalog, or the
/// single requested letter, defaulting to the highest resolution.
fn selected_resolutions(options: &FetchOptions) -> Vec<char> {
    match options.top_x_resolutions {
        Some(top_x) => RESOLUTION_TYPES[RESOLUTION_TYPES.len() - top_x..].to_vec(),
        None => vec![options.resolution.unwrap_or('I')],
    }
}

async fn download_stream(url: &str, path: &Utf8Path) -> Result<(), TidarError> {
    let mut file = tokio::fs::File::create(path).await?;

    let mut stream = reqwest::get(url)
        .await?
        .error_for_status()?
        .bytes_stream();
    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

/// Download a file from a URL to a path, streaming it in chunks.
pub(crate) fn download_file(url: &str, path: &Utf8Path) -> Result<(), TidarError> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(download_stream(url, path))
}

fn extract_zip(zip_path: &Utf8Path, destination: &Utf8Path) -> Result<(), TidarError> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    archive.extract(destination)?;
    Ok(())
}

/// Report the known downlink gaps for observations with no BIDR data.
fn log_bidr_gap_notes(observation_number: &str) {
    info!("Due to data gaps or issues with downlinking, flyby does not have associated BIDR data.");
    match observation_number {
        "0048" => info!("0048 (T4) did not have SAR data, only scatterometry and radiometry"),
        "0186" => info!("0186 (T52) only has radiometry and compressed scatterometry"),
        "0189" => info!("0189 (T53) only has radiometry and compressed scatterometry"),
        "0209" => info!("0209 (T63) only has scatterometry and radiometry"),
        "0234" => info!("0234 (T80) only has scatterometry and radiometry"),
        other => info!("{other} does not have BIDR data"),
    }
}

fn download_aareadme(coradr_id: &str, results_dir: &Utf8Path) -> Result<(), TidarError> {
    let url = format!("{PDS_CASSINI_BASE_URL}/{coradr_id}/AAREADME.TXT");
    info!("Retrieving {coradr_id} AAREADME.TXT");
    download_file(&url, &results_dir.join("AAREADME.TXT"))
}

fn download_bidr_products(
    env: &TidarEnv,
    coradr_id: &str,
    segment: &str,
    resolutions: &[char],
    results_dir: &Utf8Path,
) -> Result<(), TidarError> {
    let base_url = format!("{PDS_CASSINI_BASE_URL}/{coradr_id}/DATA/BIDR/");
    info!("Retrieving BIDR filenames from: {base_url}");

    let all_files = list_remote_files(env, &base_url)?;
    let wanted: Vec<&String> = all_files
        .iter()
        .filter(|name| {
            (name.ends_with(".LBL") || name.ends_with(".ZIP"))
                && bidr_matches(name, segment, resolutions)
        })
        .collect();

    info!(
        "All BIDR files found with specified resolution, segment, and flyby identification: \
         {wanted:?}"
    );
    if wanted.is_empty() {
        return Err(TidarError::NoMatchingBidrFiles { all_files });
    }

    for (index, filename) in wanted.iter().enumerate() {
        let url = format!("{base_url}{filename}");
        info!("Retrieving [{}/{}]: {url}", index + 1, wanted.len());
        let local_path = results_dir.join(filename);
        download_file(&url, &local_path)?;
        if filename.ends_with(".ZIP") {
            extract_zip(&local_path, results_dir)?;
        }
    }
    Ok(())
}

fn download_sbdr_products(
    env: &TidarEnv,
    coradr_id: &str,
    results_dir: &Utf8Path,
) -> Result<(), TidarError> {
    let base_url = format!("{PDS_CASSINI_BASE_URL}/{coradr_id}/DATA/SBDR/");
    info!("Retrieving SBDR filenames from: {base_url}");

    let all_files = list_remote_files(env, &base_url)?;
    let sbdr_files: Vec<&String> = all_files
        .iter()
        .filter(|name| {
            name.starts_with("SBDR") && (name.ends_with(".TAB") || name.ends_with(".FMT"))
        })
        .collect();
    info!("SBDR files found: {sbdr_files:?}");

    for filename in sbdr_files {
        let url = format!("{base_url}{filename}");
        info!("Retrieving SBDR file '{filename}': {url}");
        download_file(&url, &results_dir.join(filename))?;
    }
    Ok(())
}

/// Fetch the archived products of one flyby into `tidar_results/{CORADR}_{segment}/`.
///
/// Resolves the observation through the identifier codec (free-form designators are
/// capitalized, observation numbers zero-padded), validates the selection, resolves the
/// canonical archive version, then downloads the AAREADME, the matching BIDR products
/// (extracting `.ZIP` images in place), and the SBDR tables. Returns the results directory.
pub fn fetch_flyby_products(
    env: &TidarEnv,
    source: &TableSource,
    options: &FetchOptions,
) -> Result<Utf8PathBuf, TidarError> {
    // Normalization of free-form identifiers happens here, at the public boundary;
    // the codec itself is case-sensitive.
    let flyby_id = options.flyby_id.as_deref().map(capitalize);
    let observation_number = options
        .observation_number
        .as_deref()
        .map(pad_observation_number);

    if flyby_id.is_none() && observation_number.is_none() {
        return Err(TidarError::MissingEither {
            first: "flyby_observation_num",
            second: "flyby_id",
        });
    }
    check_resolution_selection(options.resolution, options.top_x_resolutions)?;
    let Some(segment) = options.segment.as_deref() else {
        return Err(TidarError::MissingField {
            field: "segment_num",
        });
    };

    let valid_segments = segment_options(source)?;
    if !valid_segments.iter().any(|option| option == segment) {
        return Err(TidarError::UnknownSegment {
            segment: segment.to_string(),
            options: valid_segments,
        });
    }

    let observation_number = match (&flyby_id, observation_number) {
        (Some(id), _) => designator_to_observation_number(source, id)?,
        (None, Some(number)) => number,
        (None, None) => {
            return Err(TidarError::MissingEither {
                first: "flyby_observation_num",
                second: "flyby_id",
            })
        }
    };
    let (_, available_numbers) = available_flybys(source)?;
    if !available_numbers.contains(&observation_number) {
        return Err(TidarError::UnknownObservationNumber {
            number: observation_number,
            available: available_numbers,
        });
    }

    let missing_bidr = observations_without_bidr(source)?;
    let has_bidr = !missing_bidr.contains(&observation_number);
    if !has_bidr {
        log_bidr_gap_notes(&observation_number);
    }

    let coradr_id = most_recent_archive_id(source, &observation_number)?;
    let results_dir = Utf8PathBuf::from(RESULTS_DIR).join(format!("{coradr_id}_{segment}"));
    fs::create_dir_all(&results_dir)?;

    download_aareadme(&coradr_id, &results_dir)?;
    if has_bidr {
        download_bidr_products(
            env,
            &coradr_id,
            segment,
            &selected_resolutions(options),
            &results_dir,
        )?;
    }
    download_sbdr_products(env, &coradr_id, &results_dir)?;

    for data_type in &options.additional_data_types {
        if data_type != "BIDR" && data_type != "SBDR" {
            info!(
                "Additional data type '{data_type}' at \
                 {PDS_CASSINI_BASE_URL}/{coradr_id}/DATA/{data_type} is not fetched"
            );
        }
    }

    if results_dir.read_dir_utf8()?.next().is_none() {
        warn!("{results_dir} is empty. Unable to find any data files with current parameters");
    }
    Ok(results_dir)
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[test]
    fn test_capitalize_normalizes_designator_case() {
        assert_eq!(capitalize("t65"), "T65");
        assert_eq!(capitalize("T65"), "T65");
        assert_eq!(capitalize("tA"), "Ta");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_bidr_filter_requires_segment_and_resolution() {
        let name = "BIBQI67S176_D211_T065S01_V03.ZIP";
        assert!(bidr_matches(name, "S01", &['I']));
        assert!(!bidr_matches(name, "S02", &['I']));
        assert!(!bidr_matches(name, "S01", &['B']));
        assert!(bidr_matches(name, "S01", &['H', 'I']));
        // Non-BIDR names never match.
        assert!(!bidr_matches("SBDR_15_D211_V03.TAB", "S01", &['I']));
    }

    #[test]
    fn test_selected_resolutions() {
        let defaults = FetchOptions::default();
        assert_eq!(selected_resolutions(&defaults), vec!['I']);

        let fixed = FetchOptions {
            resolution: Some('B'),
            ..Default::default()
        };
        assert_eq!(selected_resolutions(&fixed), vec!['B']);

        let top_two = FetchOptions {
            top_x_resolutions: Some(2),
            ..Default::default()
        };
        assert_eq!(selected_resolutions(&top_two), vec!['H', 'I']);
    }

    #[test]
    fn test_fetch_requires_an_identifier() {
        let env = TidarEnv::new();
        let options = FetchOptions {
            segment: Some("S01".into()),
            ..Default::default()
        };
        let err = fetch_flyby_products(&env, &TableSource::Packaged, &options).unwrap_err();
        assert_eq!(
            err,
            TidarError::MissingEither {
                first: "flyby_observation_num",
                second: "flyby_id",
            }
        );
    }

    #[test]
    fn test_fetch_rejects_unknown_segment_before_any_download() {
        let env = TidarEnv::new();
        let options = FetchOptions {
            flyby_id: Some("T65".into()),
            segment: Some("S99".into()),
            ..Default::default()
        };
        let err = fetch_flyby_products(&env, &TableSource::Packaged, &options).unwrap_err();
        assert!(matches!(err, TidarError::UnknownSegment { .. }));
    }

    #[test]
    fn test_fetch_rejects_conflicting_resolution_selection() {
        let env = TidarEnv::new();
        let options = FetchOptions {
            flyby_id: Some("T65".into()),
            segment: Some("S01".into()),
            resolution: Some('I'),
            top_x_resolutions: Some(2),
            ..Default::default()
        };
        let err = fetch_flyby_products(&env, &TableSource::Packaged, &options).unwrap_err();
        assert!(err.is_validation());
    }
}
