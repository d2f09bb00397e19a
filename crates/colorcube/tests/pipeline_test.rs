//! End-to-end tests of lattice -> mesh -> scene, without a GPU.

use colorcube_rs::*;
use proptest::prelude::*;
use serde_json::json;

fn dataset_json(n: u32, green_len: usize) -> String {
    let lattice = Lattice::identity(n).unwrap();
    let mut green = lattice.green().to_vec();
    green.resize(green_len, 0.0);
    json!({
        "cubesize": n,
        "redValues": lattice.red(),
        "greenValues": green,
        "blueValues": lattice.blue(),
        "inputColors": lattice
            .colors()
            .iter()
            .map(|c| [c.r, c.g, c.b])
            .collect::<Vec<_>>(),
    })
    .to_string()
}

#[test]
fn identity_lattice_endpoints() {
    for n in 1..=6 {
        let lattice = Lattice::identity(n).unwrap();
        assert_eq!(lattice.len(), (n * n * n) as usize);
        assert_eq!(lattice.color(0), Some(ColorSample::new(0.0, 0.0, 0.0)));
        if n > 1 {
            let last = lattice.len() - 1;
            assert_eq!(lattice.color(last), Some(ColorSample::new(1.0, 1.0, 1.0)));
        }
    }
}

#[test]
fn cube_size_two_mesh() {
    let lattice = Lattice::identity(2).unwrap();
    let mesh = CubeMeshBuilder::new().build(&lattice).unwrap();

    assert_eq!(mesh.sample_count(), 8);
    assert_eq!(mesh.triangle_count(), 96);
    assert_eq!(mesh.vertex_count(), 288);
    assert_eq!(mesh.positions().len(), 8 * 12 * 3 * 3);
    assert_eq!(mesh.normals().len(), mesh.positions().len());
    assert_eq!(mesh.colors().len(), mesh.positions().len());

    let first = lattice.samples().next().unwrap();
    assert_eq!(first.position, Vec3::ZERO);
    assert_eq!(first.color.to_vec3(), Vec3::ZERO);
    let last = lattice.samples().last().unwrap();
    assert_eq!(last.index, 7);
    assert_eq!(last.position, Vec3::ONE);
    assert_eq!(last.color.to_vec3(), Vec3::ONE);

    for t in mesh.triangles_of_sample(7) {
        let triangle = mesh.triangle(t).unwrap();
        assert_eq!(triangle.colors, [Vec3::ONE; 3]);
    }
}

#[test]
fn short_dataset_fails_before_meshing() {
    let err = Dataset::from_json_str(&dataset_json(4, 60))
        .and_then(Dataset::into_lattice)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedLattice);
    assert!(matches!(
        err,
        ColorCubeError::MalformedLattice {
            field: "green",
            expected: 64,
            actual: 60
        }
    ));
}

#[test]
fn dataset_file_to_scene() {
    let dir = std::env::temp_dir().join(format!("colorcube-pipeline-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cube.json");
    std::fs::write(&path, dataset_json(3, 27)).unwrap();

    let options = Options {
        dataset: Some(path),
        ..Options::default()
    };
    let scene = build_scene(&options).unwrap();
    assert_eq!(scene.mesh.cube_size(), 3);
    assert_eq!(scene.mesh.triangle_count(), 27 * TRIANGLES_PER_CUBE);
    assert_eq!(scene.mesh, CubeMeshBuilder::new().build(&Lattice::identity(3).unwrap()).unwrap());

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn invalid_cube_size_is_config_error() {
    let options = Options {
        cube_size: 0,
        ..Options::default()
    };
    assert_eq!(build_scene(&options).unwrap_err().kind(), ErrorKind::Config);
    assert_eq!(Lattice::identity(0).unwrap_err().kind(), ErrorKind::Config);
}

#[test]
fn alias_normalization() {
    assert_eq!(normalize_field_name("cubesize"), Some(DatasetField::CubeSize));
    assert_eq!(normalize_field_name("redValues"), Some(DatasetField::Red));
    assert_eq!(normalize_field_name("inputColors"), Some(DatasetField::Colors));
    assert_eq!(normalize_field_name("alpha"), None);
    for field in DatasetField::ALL {
        assert_eq!(normalize_field_name(field.key()), Some(field));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn mesh_invariants(n in 1u32..=5) {
        let lattice = Lattice::identity(n).unwrap();
        let mesh = CubeMeshBuilder::new().build(&lattice).unwrap();
        let samples = (n * n * n) as usize;
        prop_assert_eq!(mesh.positions().len(), samples * 12 * 3 * 3);

        for t in 0..mesh.triangle_count() {
            let triangle = mesh.triangle(t).unwrap();
            let sample = sample_index_of_triangle(t);
            prop_assert_eq!(sample, t / 12);

            let color = lattice.color(sample).unwrap().to_vec3();
            for c in triangle.colors {
                prop_assert_eq!(c.to_array().map(f32::to_bits), color.to_array().map(f32::to_bits));
            }
            prop_assert_eq!(triangle.normals[0], triangle.normals[1]);
            prop_assert_eq!(triangle.normals[1], triangle.normals[2]);
            prop_assert!((triangle.normals[0].length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn index_formula(n in 1u32..=12, coords in any::<(u32, u32, u32)>()) {
        let lattice = Lattice::identity(n).unwrap();
        let (r, g, b) = (coords.0 % n, coords.1 % n, coords.2 % n);
        let index = lattice.index_of(r, g, b).unwrap();
        prop_assert_eq!(index, (r * n * n + g * n + b) as usize);
        prop_assert_eq!(lattice.grid_coords(index), Some(UVec3::new(r, g, b)));
    }
}
