use ictal::resample::{resample, resample_1d, resample_all};
use ictal::{resample_epoch, Epoch, SourceLabel};
use ndarray::Array2;

const X: [f64; 8] = [0.0, 1.0, 3.0, 2.0, 5.0, 4.0, 1.0, 0.0];

fn assert_close(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        approx::assert_abs_diff_eq!(*g, *w, epsilon = 1e-9);
    }
}

#[test]
fn downsample_even_doubles_nyquist_bin() {
    let want = [0.116116523517, 2.073223304703, 4.383883476483, 1.426776695297];
    assert_close(&resample_1d(&X, 4), &want);
}

#[test]
fn upsample_by_two_keeps_original_samples() {
    let y = resample_1d(&X, 16);
    let want = [
        0.0, 0.093980851434, 1.0, 2.432809724484, 3.0, 2.328858133617, 2.0, 3.256436672758, 5.0,
        5.320232710939, 4.0, 2.274297056703, 1.0, 0.25692830401, 0.0, 0.036456546056,
    ];
    assert_close(&y, &want);
    for (i, &x) in X.iter().enumerate() {
        approx::assert_abs_diff_eq!(y[2 * i], x, epsilon = 1e-9);
    }
}

#[test]
fn odd_length_input() {
    let want = [-0.287098382718, 2.101446081066, 2.466970744298, 4.742105243473, 2.405147742452];
    assert_close(&resample_1d(&X[..7], 5), &want);
}

#[test]
fn every_channel_resampled_independently() {
    let data = Array2::from_shape_fn((3, 8), |(c, t)| X[t] * (c as f64 + 1.0));
    let out = resample(&data, 4);
    assert_eq!(out.dim(), (3, 4));
    let base = resample_1d(&X, 4);
    for c in 0..3 {
        let scaled: Vec<f64> = base.iter().map(|v| v * (c as f64 + 1.0)).collect();
        assert_close(&out.row(c).to_vec(), &scaled);
    }
}

#[test]
fn epoch_metadata_survives_resampling() {
    let e = Epoch::new("Dog_3_ictal_segment_2", Array2::from_elem((2, 5000), -0.75), 5000.0)
        .unwrap()
        .with_label(SourceLabel::Ictal)
        .with_latency(12.0);
    let r = resample_epoch(&e, 400).unwrap();
    assert_eq!(r.id, e.id);
    assert_eq!(r.data.dim(), (2, 400));
    assert_eq!((r.label, r.latency), (Some(SourceLabel::Ictal), Some(12.0)));
    approx::assert_abs_diff_eq!(r.sfreq, 400.0, epsilon = 1e-9);
    for &v in r.data.iter() {
        approx::assert_abs_diff_eq!(v, -0.75, epsilon = 1e-9);
    }
    assert!(resample_epoch(&e, 0).is_err());
}

#[test]
fn data_root_is_mirrored_per_patient() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    for (patient, n) in [("Dog_1", 2), ("Patient_2", 1)] {
        let dir = src.path().join(patient);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..n {
            Epoch::new("e", Array2::from_elem((3, 1000), 2.5), 1000.0)
                .unwrap()
                .with_label(SourceLabel::Interictal)
                .save(&dir.join(format!("{patient}_interictal_segment_{}.safetensors", i + 1)))
                .unwrap();
        }
    }
    std::fs::create_dir_all(src.path().join(".hidden")).unwrap();

    assert_eq!(resample_all(src.path(), dst.path(), 400).unwrap(), 3);
    for name in [
        "Dog_1/Dog_1_interictal_segment_1.safetensors",
        "Dog_1/Dog_1_interictal_segment_2.safetensors",
        "Patient_2/Patient_2_interictal_segment_1.safetensors",
    ] {
        let e = Epoch::load(&dst.path().join(name)).unwrap();
        assert_eq!(e.data.dim(), (3, 400), "{name}");
        assert_eq!(e.label, Some(SourceLabel::Interictal));
    }
    assert!(!dst.path().join(".hidden").exists());
}
