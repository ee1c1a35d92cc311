use serde::Serialize;

use organelle_core::{
    geometry::{Bounds, Insets, Position},
    identifier::Id,
    semantic::{RoleType, ShapeFamily},
};

use super::{ATTACHMENT_SIZE, AttachmentGlyph, Connector, Glyph, GlyphId, GlyphKind, Role};

/// Room kept above a glyph that is both input and catalyst, for the
/// catalyst line.
pub const CATALYST_RESERVATION: f32 = 50.0;

/// A participant of the reaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityGlyph {
    id: GlyphId,
    entity_id: String,
    name: String,
    shape: ShapeFamily,
    trivial: Option<bool>,
    roles: Vec<Role>,
    compartment: Option<Id>,
    attachments: Vec<AttachmentGlyph>,
    position: Position,
    label_lines: Vec<String>,
    connector: Connector,
    /// Set on glyphs split off from another glyph of the same entity.
    duplicate: bool,
}

impl EntityGlyph {
    pub fn new(id: GlyphId, entity_id: &str, name: &str, shape: ShapeFamily) -> Self {
        Self {
            id,
            entity_id: entity_id.to_string(),
            name: name.to_string(),
            shape,
            trivial: None,
            roles: Vec::new(),
            compartment: None,
            attachments: Vec::new(),
            position: Position::default(),
            label_lines: Vec::new(),
            connector: Connector::new(),
            duplicate: false,
        }
    }

    pub fn with_trivial(mut self, trivial: Option<bool>) -> Self {
        self.trivial = trivial;
        self
    }

    pub fn with_compartment(mut self, compartment: Option<Id>) -> Self {
        self.compartment = compartment;
        self
    }

    pub fn with_role(mut self, role_type: RoleType, stoichiometry: u32) -> Self {
        self.add_role(role_type, stoichiometry);
        self
    }

    /// Identifier of the physical entity, shared by all of its glyphs.
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn shape(&self) -> ShapeFamily {
        self.shape
    }

    pub fn trivial(&self) -> Option<bool> {
        self.trivial
    }

    /// Roles ordered by role type.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role_type: RoleType) -> bool {
        self.role(role_type).is_some()
    }

    pub fn role(&self, role_type: RoleType) -> Option<&Role> {
        self.roles.iter().find(|role| role.role_type() == role_type)
    }

    /// Whether the glyph is drawn both as a substrate and as a catalyst.
    pub fn is_input_and_catalyst(&self) -> bool {
        self.has_role(RoleType::Input) && self.has_role(RoleType::Catalyst)
    }

    pub fn compartment(&self) -> Option<Id> {
        self.compartment
    }

    pub fn attachments(&self) -> &[AttachmentGlyph] {
        &self.attachments
    }

    pub fn label_lines(&self) -> &[String] {
        &self.label_lines
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    /// Adds a role, summing the stoichiometry if the role is already present.
    pub fn add_role(&mut self, role_type: RoleType, stoichiometry: u32) {
        match self.roles.iter_mut().find(|role| role.role_type() == role_type) {
            Some(role) => role.add_stoichiometry(stoichiometry),
            None => {
                self.roles.push(Role::new(role_type, stoichiometry));
                self.roles.sort_by_key(Role::role_type);
            }
        }
    }

    /// Adds a decoration unless one with the same source id exists.
    pub fn add_attachment(&mut self, attachment: AttachmentGlyph) {
        if self
            .attachments
            .iter()
            .all(|existing| existing.source_id() != attachment.source_id())
        {
            self.attachments.push(attachment);
        }
    }

    /// Copy of this glyph carrying only `role`, flagged as a duplicate.
    ///
    /// Attachments are copied under the identities produced by
    /// `attachment_id`; connector and label are left for later stages.
    pub fn split_off(
        &self,
        id: GlyphId,
        role: Role,
        mut attachment_id: impl FnMut() -> GlyphId,
    ) -> Self {
        Self {
            id,
            roles: vec![role],
            attachments: self
                .attachments
                .iter()
                .map(|attachment| attachment.duplicate(attachment_id()))
                .collect(),
            connector: Connector::new(),
            duplicate: true,
            ..self.clone()
        }
    }

    pub(crate) fn retain_roles(&mut self, keep: impl Fn(&Role) -> bool) {
        self.roles.retain(keep);
    }

    pub(crate) fn set_compartment(&mut self, compartment: Id) {
        self.compartment = Some(compartment);
    }

    pub(crate) fn set_label_lines(&mut self, lines: Vec<String>) {
        self.label_lines = lines;
    }

    pub(crate) fn attachments_mut(&mut self) -> &mut [AttachmentGlyph] {
        &mut self.attachments
    }

    pub(crate) fn set_connector(&mut self, connector: Connector) {
        self.connector = connector;
    }
}

impl Glyph for EntityGlyph {
    fn id(&self) -> GlyphId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> GlyphKind {
        GlyphKind::Entity(self.shape)
    }

    fn position(&self) -> &Position {
        &self.position
    }

    fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// The glyph box, raised by [`CATALYST_RESERVATION`] for input-catalysts
    /// and grown by one attachment size on every side when decorated.
    fn bounds(&self) -> Bounds {
        let mut bounds = self.position.bounds();
        if self.is_input_and_catalyst() {
            bounds = bounds.add_padding(Insets::new(CATALYST_RESERVATION, 0.0, 0.0, 0.0));
        }
        if !self.attachments.is_empty() {
            bounds = bounds.add_padding(Insets::uniform(ATTACHMENT_SIZE));
        }
        bounds
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.position.translate(dx, dy);
        for attachment in &mut self.attachments {
            attachment.translate(dx, dy);
        }
        self.connector.translate(dx, dy);
    }
}
