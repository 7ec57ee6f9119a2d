use crate::{
    ast::{Expr, ForLoop, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            statement::Flow,
        },
        host::Host,
        value::core::Value,
    },
};

/// Which way a `for` loop counts.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Increasing,
    Decreasing,
}

/// The bounds of a `for` loop, fixed before the first iteration.
struct Counter {
    current:   i64,
    end:       i64,
    step:      i64,
    direction: Direction,
}

impl Counter {
    /// Whether `value` is still inside the bounds.
    const fn admits(&self, value: i64) -> bool {
        match self.direction {
            Direction::Increasing => value <= self.end,
            Direction::Decreasing => value >= self.end,
        }
    }
}

impl<H: Host> Context<H> {
    /// Runs a `while` loop. The condition is tested before every iteration.
    pub(super) fn execute_while<'a>(&mut self,
                                    condition: &Expr,
                                    body: &'a [Statement])
                                    -> EvalResult<Flow<'a>> {
        let mut iterations = 0;
        while self.eval_condition(condition)? {
            if let flow @ Flow::Return(_) = self.execute_block(body)? {
                return Ok(flow);
            }
            self.tick(&mut iterations)?;
        }
        Ok(Flow::Normal)
    }

    /// Runs a `do ... until` loop. The body always runs once before the
    /// condition is first tested, on every entry to the loop.
    pub(super) fn execute_do_until<'a>(&mut self,
                                       body: &'a [Statement],
                                       condition: &Expr)
                                       -> EvalResult<Flow<'a>> {
        let mut iterations = 0;
        loop {
            if let flow @ Flow::Return(_) = self.execute_block(body)? {
                return Ok(flow);
            }
            self.tick(&mut iterations)?;
            if self.eval_condition(condition)? {
                return Ok(Flow::Normal);
            }
        }
    }

    /// Runs a `for` loop.
    ///
    /// The loop keeps its own counter: the variable is written from the
    /// counter before each iteration, so assigning to it inside the body does
    /// not change how many iterations run.
    pub(super) fn execute_for<'a>(&mut self, for_loop: &'a ForLoop) -> EvalResult<Flow<'a>> {
        let mut counter = self.begin_for(for_loop)?;
        let mut iterations = 0;

        while counter.admits(counter.current) {
            self.write_loop_variable(for_loop, counter.current)?;
            if let flow @ Flow::Return(_) = self.execute_block(&for_loop.body)? {
                return Ok(flow);
            }
            self.tick(&mut iterations)?;

            match counter.current.checked_add(counter.step) {
                Some(next) => counter.current = next,
                None => break,
            }
        }
        Ok(Flow::Normal)
    }

    /// Assigns the starting value, then evaluates and checks the bounds.
    fn begin_for(&mut self, for_loop: &ForLoop) -> EvalResult<Counter> {
        let start = self.eval_value(&for_loop.start)?;
        self.scope
            .assign(&for_loop.variable, start.clone(), None)
            .map_err(|error| error.at(&for_loop.variable, for_loop.position))?;
        let Value::Integer(start) = start else {
            return Err(RuntimeError::type_mismatch("Starting value is not an Integer",
                                                   for_loop.start.position()));
        };

        let Value::Integer(end) = self.eval_value(&for_loop.end)? else {
            return Err(RuntimeError::type_mismatch("Final value is not an Integer",
                                                   for_loop.end.position()));
        };

        let (step, step_position) = match &for_loop.step {
            Some(expr) => {
                let Value::Integer(step) = self.eval_value(expr)? else {
                    return Err(RuntimeError::type_mismatch("Step value is not an Integer",
                                                           expr.position()));
                };
                (step, expr.position())
            },
            None => (1, for_loop.position),
        };

        let direction = if start <= end && step > 0 {
            Direction::Increasing
        } else if start >= end && step < 0 {
            Direction::Decreasing
        } else if step == 0 {
            return Err(RuntimeError::evaluation("Step must have non-zero value", step_position));
        } else {
            return Err(RuntimeError::evaluation("Step value must align with bounds of for loop",
                                                step_position));
        };

        Ok(Counter { current: start,
                     end,
                     step,
                     direction })
    }

    fn write_loop_variable(&mut self, for_loop: &ForLoop, value: i64) -> EvalResult<()> {
        self.scope
            .assign(&for_loop.variable, Value::Integer(value), None)
            .map_err(|error| error.at(&for_loop.variable, for_loop.position))
    }

    /// Counts one loop iteration, yielding to the host every
    /// `yield_interval` iterations and stopping if the run was cancelled.
    fn tick(&mut self, iterations: &mut usize) -> EvalResult<()> {
        *iterations += 1;
        if *iterations % self.config.yield_interval.max(1) == 0 {
            self.host.pause();
        }
        self.check_running()
    }
}
