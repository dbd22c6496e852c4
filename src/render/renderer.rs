//! Frame orchestration. Owns every per-frame cache and rebuilds each one on its own
//! trigger: tables on rotation or resize, the background on move or rotation.
use tracing::debug;

use crate::config::ScreenConfig;
use crate::core::camera::Camera;
use crate::core::entity::Entities;
use crate::core::grid::Grid;
use crate::render::casters::render_walls;
use crate::render::depth::DepthBuffer;
use crate::render::floor::FloorCeiling;
use crate::render::framebuffer::Framebuffer;
use crate::render::shading::Lighting;
use crate::render::sprites::render_billboards;
use crate::render::tables::GeometryTables;
use crate::render::textures::TextureSet;

pub struct Renderer {
    width: usize,
    height: usize,
    stride: usize,
    tables: Option<GeometryTables>,
    table_rebuilds: u64,
    depth: DepthBuffer,
    background: FloorCeiling,
    frame: Framebuffer,
    lighting: Lighting,
}

impl Renderer {
    pub fn new(screen: &ScreenConfig, lighting: Lighting) -> Self {
        let stride = screen.column_stride.max(1);
        debug!(width = screen.width, height = screen.height, stride, "renderer created");
        Self {
            width: screen.width,
            height: screen.height,
            stride,
            tables: None,
            table_rebuilds: 0,
            depth: DepthBuffer::new(screen.width, stride),
            background: FloorCeiling::new(screen.width, screen.height),
            frame: Framebuffer::new(screen.width, screen.height),
            lighting,
        }
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn tables(&self) -> Option<&GeometryTables> {
        self.tables.as_ref()
    }

    /// How many times the geometry tables have been built.
    pub fn table_rebuilds(&self) -> u64 {
        self.table_rebuilds
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Needed after textures change; the background cache only watches the camera.
    pub fn invalidate_background(&mut self) {
        self.background.invalidate();
    }

    /// Background, then walls (filling the depth buffer), then billboards.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        grid: &Grid,
        entities: &Entities,
        textures: &TextureSet,
    ) -> &Framebuffer {
        let (w, h, s) = (self.width, self.height, self.stride);
        let tables = match self.tables.take() {
            Some(t) if t.matches(camera, w, h, s) => t,
            _ => {
                self.table_rebuilds += 1;
                GeometryTables::rebuild(camera, w, h, s)
            }
        };

        self.background
            .render(camera, &tables, &textures.floor, &textures.ceiling, &self.lighting.fog);
        self.frame.copy_from(self.background.background());

        self.depth.reset();
        render_walls(
            &mut self.frame,
            &mut self.depth,
            camera,
            grid,
            &tables,
            &textures.wall,
            &self.lighting,
        );
        render_billboards(
            &mut self.frame,
            &self.depth,
            camera,
            entities,
            &textures.decoration,
            &self.lighting.fog,
        );

        self.tables = Some(tables);
        &self.frame
    }
}
