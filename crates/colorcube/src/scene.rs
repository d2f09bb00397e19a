//! Scene assembly: lattice, mesh, light and material, ready to upload.

use glam::Vec3;

use colorcube_core::{
    CameraConfig, CubeMesh, CubeMeshBuilder, HemisphereLight, Lattice, Options, Result,
};
use colorcube_render::MeshUniforms;

/// Surface settings for the cube mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshMaterial {
    /// Shade back faces too.
    pub double_sided: bool,
    /// Take colors from the mesh instead of a single base color.
    pub vertex_colors: bool,
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            double_sided: true,
            vertex_colors: true,
        }
    }
}

/// A composed scene: one batched cube mesh lit by one hemisphere light.
#[derive(Debug, Clone)]
pub struct Scene {
    /// The batched mesh, one cube per sample.
    pub mesh: CubeMesh,
    /// Scene light.
    pub light: HemisphereLight,
    /// Mesh material.
    pub material: MeshMaterial,
    /// Clear color.
    pub background_color: Vec3,
    /// Initial camera.
    pub camera: CameraConfig,
}

impl Scene {
    /// Loads the lattice named by `options` and builds its scene.
    pub fn from_options(options: &Options) -> Result<Self> {
        options.validate()?;
        let lattice = options.lattice_source().load()?;
        Self::from_lattice(&lattice, options)
    }

    /// Builds a scene for an existing lattice.
    pub fn from_lattice(lattice: &Lattice, options: &Options) -> Result<Self> {
        let mesh = CubeMeshBuilder::new()
            .maybe_point_size(options.point_size)
            .build(lattice)?;
        Ok(Self::from_mesh(mesh, options))
    }

    /// Wraps an already built mesh.
    #[must_use]
    pub fn from_mesh(mesh: CubeMesh, options: &Options) -> Self {
        Self {
            mesh,
            light: options.light,
            material: MeshMaterial::default(),
            background_color: options.background_color,
            camera: options.camera.clone(),
        }
    }

    /// GPU uniforms for the light and material.
    #[must_use]
    pub fn mesh_uniforms(&self) -> MeshUniforms {
        MeshUniforms::new(
            &self.light,
            self.material.double_sided,
            self.material.vertex_colors,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorcube_core::ErrorKind;

    #[test]
    fn test_default_scene() {
        let options = Options {
            cube_size: 3,
            ..Options::default()
        };
        let scene = Scene::from_options(&options).unwrap();
        assert_eq!(scene.mesh.sample_count(), 27);
        assert_eq!(scene.mesh.triangle_count(), 27 * 12);
        assert_eq!(scene.material, MeshMaterial::default());
        assert!(scene.material.double_sided && scene.material.vertex_colors);
        assert_eq!(scene.camera.position, Vec3::splat(2.0));
        assert_eq!(scene.camera.target, Vec3::splat(0.5));
        assert_eq!(scene.light, HemisphereLight::default());
    }

    #[test]
    fn test_point_size_override() {
        let options = Options {
            cube_size: 2,
            point_size: Some(0.1),
            ..Options::default()
        };
        let scene = Scene::from_options(&options).unwrap();
        assert_eq!(scene.mesh.point_size(), 0.1);
    }

    #[test]
    fn test_invalid_options_abort_before_mesh() {
        let options = Options {
            cube_size: 0,
            ..Options::default()
        };
        let err = Scene::from_options(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_dataset_is_io_error() {
        let options = Options {
            dataset: Some("/nonexistent/colorcube/dataset.json".into()),
            ..Options::default()
        };
        let err = Scene::from_options(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_mesh_uniforms_follow_material() {
        let options = Options {
            cube_size: 1,
            ..Options::default()
        };
        let mut scene = Scene::from_options(&options).unwrap();
        scene.material.vertex_colors = false;
        let uniforms = scene.mesh_uniforms();
        assert_eq!(uniforms.vertex_colors, 0);
        assert_eq!(uniforms.double_sided, 1);
    }
}
